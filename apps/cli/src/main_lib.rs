use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fxfolio_core::diagnostics::{DiagnosticSink, WriterDiagnosticSink};
use fxfolio_core::utils::time_utils::{parse_valuation_date, valuation_date_today};
use fxfolio_core::{import, sample, Asset, FxRate, ValuationEngine, ValuationReport};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, LogFormat};
use crate::prompt::prompt_valuation_date;
use crate::report::{render_json, render_table};

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Warning sink for the binary. Table output shares stdout with warnings;
/// JSON output keeps stdout a single document and sends warnings to stderr.
pub fn diagnostic_sink_for(format: OutputFormat) -> Arc<dyn DiagnosticSink> {
    match format {
        OutputFormat::Table => Arc::new(WriterDiagnosticSink::new(std::io::stdout())),
        OutputFormat::Json => Arc::new(WriterDiagnosticSink::new(std::io::stderr())),
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Resolves the valuation date: explicit flag, then `fallback`, then prompt.
fn resolve_date<R, W>(
    cli: &Cli,
    fallback: Option<NaiveDate>,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<NaiveDate>
where
    R: BufRead,
    W: Write,
{
    if let Some(raw) = &cli.date {
        return parse_valuation_date(raw).with_context(|| format!("invalid --date '{}'", raw));
    }
    if let Some(date) = fallback {
        return Ok(date);
    }
    if cli.no_prompt {
        return Ok(valuation_date_today());
    }
    prompt_valuation_date(input, prompt_out).context("failed to read valuation date")
}

fn load_assets(cli: &Cli, valuation_date: NaiveDate) -> Result<Vec<Asset>> {
    match &cli.assets {
        Some(path) => import::load_assets_csv(open(path)?, valuation_date)
            .with_context(|| format!("failed to load assets from {}", path.display())),
        None => Ok(sample::sample_assets(valuation_date)?),
    }
}

fn load_fx_rates(cli: &Cli) -> Result<Vec<FxRate>> {
    match &cli.rates {
        Some(path) => import::load_fx_rates_csv(open(path)?)
            .with_context(|| format!("failed to load FX rates from {}", path.display())),
        None => Ok(sample::sample_fx_rates()?),
    }
}

/// Gathers inputs and values the portfolio.
///
/// Missing/stale rate warnings go to `sink`. The date prompt, when needed,
/// reads `input` and writes to `prompt_out`.
pub fn build_report<R, W>(
    cli: &Cli,
    config: &Config,
    sink: Arc<dyn DiagnosticSink>,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<ValuationReport>
where
    R: BufRead,
    W: Write,
{
    let valuation_config =
        config.valuation_config(cli.home_currency.as_deref(), cli.stale_days)?;
    let engine = ValuationEngine::new(valuation_config)?.with_diagnostic_sink(sink);

    if let Some(path) = &cli.input {
        let mut request = import::load_request_json(open(path)?)
            .with_context(|| format!("failed to read request from {}", path.display()))?;
        let date = resolve_date(cli, request.valuation_date, input, prompt_out)?;
        request.valuation_date = Some(date);
        tracing::info!("Valuing request {} as of {}", path.display(), date);
        return Ok(engine.value_request(&request)?);
    }

    let valuation_date = resolve_date(cli, None, input, prompt_out)?;
    let assets = load_assets(cli, valuation_date)?;
    let fx_rates = load_fx_rates(cli)?;
    tracing::info!(
        "Valuing {} assets with {} FX rates as of {}",
        assets.len(),
        fx_rates.len(),
        valuation_date
    );

    Ok(engine.value(&assets, &fx_rates, valuation_date)?)
}

/// Renders the report in the requested format.
pub fn render(report: &ValuationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Json => Ok(render_json(report)? + "\n"),
    }
}

/// Runs one valuation and writes the report to `out`.
///
/// Failures are printed as a single `Error:` line and are not propagated,
/// so the process still exits normally.
pub fn run<R, W>(
    cli: &Cli,
    config: &Config,
    sink: Arc<dyn DiagnosticSink>,
    input: &mut R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let outcome = build_report(cli, config, sink, input, out)
        .and_then(|report| render(&report, cli.format));

    match outcome {
        Ok(text) => write!(out, "{}", text)?,
        Err(e) => {
            tracing::error!("Valuation failed: {:#}", e);
            writeln!(out, "Error: {:#}", e)?;
        }
    }
    out.flush()
}

//! Command-line arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// fxfolio: value a multi-currency portfolio in one home currency
#[derive(Parser, Debug, Default)]
#[command(name = "fxfolio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Value a multi-currency portfolio in a single home currency", long_about = None)]
pub struct Cli {
    /// Valuation date (yyyy-MM-dd). Prompted for when omitted.
    #[arg(short, long, value_name = "DATE")]
    pub date: Option<String>,

    /// CSV of assets: name,currency,amount[,valuationDate]
    #[arg(short, long, value_name = "FILE")]
    pub assets: Option<PathBuf>,

    /// CSV of FX rates: date,currency,rate
    #[arg(short, long, value_name = "FILE")]
    pub rates: Option<PathBuf>,

    /// JSON valuation request with valuationDate, assets and fxRates
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["assets", "rates"])]
    pub input: Option<PathBuf>,

    /// Home currency (overrides FXFOLIO_HOME_CURRENCY)
    #[arg(long, value_name = "CODE")]
    pub home_currency: Option<String>,

    /// Days after which a rate is reported stale (overrides FXFOLIO_STALE_DAYS)
    #[arg(long, value_name = "DAYS")]
    pub stale_days: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Use today's date instead of prompting when no date is given
    #[arg(long)]
    pub no_prompt: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use log::debug;

use super::valuation_calculator::{calculate_total_value, evaluate_assets};
use super::valuation_model::{EvaluatedAsset, ValuationConfig, ValuationReport, ValuationRequest};
use crate::assets::Asset;
use crate::diagnostics::{DiagnosticSink, LogDiagnosticSink, ValuationWarning};
use crate::errors::Result;
use crate::fx::FxRate;

/// Values portfolios in a configured home currency.
///
/// Holds only immutable configuration and the diagnostic sink, so one engine
/// can serve any number of independent runs, including from several threads.
#[derive(Clone)]
pub struct ValuationEngine {
    config: ValuationConfig,
    diagnostic_sink: Arc<dyn DiagnosticSink>,
}

impl ValuationEngine {
    pub fn new(config: ValuationConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
            diagnostic_sink: Arc::new(LogDiagnosticSink),
        })
    }

    /// Sets the sink that receives missing/stale rate warnings.
    pub fn with_diagnostic_sink(mut self, diagnostic_sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostic_sink = diagnostic_sink;
        self
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Values `assets` on `valuation_date`, highest home value first.
    ///
    /// Assets without an eligible rate are omitted. Warnings go to the
    /// engine's sink.
    pub fn evaluate(
        &self,
        assets: &[Asset],
        fx_rates: &[FxRate],
        valuation_date: NaiveDate,
    ) -> Vec<EvaluatedAsset> {
        evaluate_assets(
            assets,
            fx_rates,
            valuation_date,
            &self.config,
            self.diagnostic_sink.as_ref(),
        )
    }

    /// Resolves and evaluates a request document.
    ///
    /// Fails with `Error::InvalidArgument` if the request lacks its assets,
    /// FX rates or valuation date.
    pub fn evaluate_request(&self, request: &ValuationRequest) -> Result<Vec<EvaluatedAsset>> {
        let inputs = request.resolve()?;
        Ok(self.evaluate(&inputs.assets, &inputs.fx_rates, inputs.valuation_date))
    }

    /// Evaluates and totals, keeping a copy of every warning in the report.
    ///
    /// Fails only if the portfolio total does not fit in a decimal.
    pub fn value(
        &self,
        assets: &[Asset],
        fx_rates: &[FxRate],
        valuation_date: NaiveDate,
    ) -> Result<ValuationReport> {
        let recorder = RecordingSink::new(self.diagnostic_sink.as_ref());
        let evaluated = evaluate_assets(assets, fx_rates, valuation_date, &self.config, &recorder);
        let total_value = calculate_total_value(&evaluated)?;

        debug!(
            "Portfolio total on {}: {} {} ({} warnings)",
            valuation_date,
            total_value,
            self.config.home_currency,
            recorder.len()
        );

        Ok(ValuationReport {
            valuation_date,
            home_currency: self.config.home_currency.clone(),
            assets: evaluated,
            total_value,
            warnings: recorder.into_warnings(),
        })
    }

    /// Resolves a request document and produces its report.
    pub fn value_request(&self, request: &ValuationRequest) -> Result<ValuationReport> {
        let inputs = request.resolve()?;
        self.value(&inputs.assets, &inputs.fx_rates, inputs.valuation_date)
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self {
            config: ValuationConfig::default(),
            diagnostic_sink: Arc::new(LogDiagnosticSink),
        }
    }
}

/// Forwards to another sink while keeping a copy of each warning.
struct RecordingSink<'a> {
    inner: &'a dyn DiagnosticSink,
    recorded: Mutex<Vec<ValuationWarning>>,
}

impl<'a> RecordingSink<'a> {
    fn new(inner: &'a dyn DiagnosticSink) -> Self {
        Self {
            inner,
            recorded: Mutex::new(Vec::new()),
        }
    }

    fn len(&self) -> usize {
        self.recorded.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn into_warnings(self) -> Vec<ValuationWarning> {
        self.recorded
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for RecordingSink<'_> {
    fn emit(&self, warning: ValuationWarning) {
        match self.recorded.lock() {
            Ok(mut recorded) => recorded.push(warning.clone()),
            Err(poisoned) => poisoned.into_inner().push(warning.clone()),
        }
        self.inner.emit(warning);
    }
}

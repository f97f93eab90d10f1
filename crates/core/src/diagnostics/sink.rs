//! Diagnostic sink trait and implementations.

use std::io::Write;
use std::sync::{Arc, Mutex};

use super::ValuationWarning;

/// Receiver for valuation warnings.
///
/// The engine calls `emit()` once per anomaly, in asset order. Receiving a
/// warning is not a failure; implementations must not panic.
pub trait DiagnosticSink: Send + Sync {
    /// Emit a single warning.
    fn emit(&self, warning: ValuationWarning);

    /// Emit multiple warnings.
    ///
    /// Default implementation calls `emit()` for each warning.
    fn emit_batch(&self, warnings: Vec<ValuationWarning>) {
        for warning in warnings {
            self.emit(warning);
        }
    }
}

/// No-op implementation for contexts that don't need warnings.
#[derive(Clone, Default)]
pub struct NoOpDiagnosticSink;

impl DiagnosticSink for NoOpDiagnosticSink {
    fn emit(&self, _warning: ValuationWarning) {}
}

/// Forwards warnings to the `log` facade at WARN level.
#[derive(Clone, Default)]
pub struct LogDiagnosticSink;

impl DiagnosticSink for LogDiagnosticSink {
    fn emit(&self, warning: ValuationWarning) {
        log::warn!("{}", warning);
    }
}

/// Writes one line per warning to a text stream.
pub struct WriterDiagnosticSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterDiagnosticSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> DiagnosticSink for WriterDiagnosticSink<W> {
    fn emit(&self, warning: ValuationWarning) {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(writer, "WARNING: {}", warning).and_then(|_| writer.flush()) {
            log::error!("Failed to write valuation warning: {}", e);
        }
    }
}

/// Mock sink for testing - collects emitted warnings.
#[derive(Clone, Default)]
pub struct MockDiagnosticSink {
    warnings: Arc<Mutex<Vec<ValuationWarning>>>,
}

impl MockDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected warnings.
    pub fn warnings(&self) -> Vec<ValuationWarning> {
        self.warnings.lock().unwrap().clone()
    }

    /// Clears collected warnings.
    pub fn clear(&self) {
        self.warnings.lock().unwrap().clear();
    }

    /// Returns the number of collected warnings.
    pub fn len(&self) -> usize {
        self.warnings.lock().unwrap().len()
    }

    /// Returns true if no warnings have been collected.
    pub fn is_empty(&self) -> bool {
        self.warnings.lock().unwrap().is_empty()
    }
}

impl DiagnosticSink for MockDiagnosticSink {
    fn emit(&self, warning: ValuationWarning) {
        self.warnings.lock().unwrap().push(warning);
    }
}

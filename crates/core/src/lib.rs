//! fxfolio Core - multi-currency portfolio valuation.
//!
//! Values a set of assets in a single home currency on a given date, using
//! the most recent FX observation on or before that date for each foreign
//! currency. Missing and stale rates are reported through a
//! [`DiagnosticSink`](diagnostics::DiagnosticSink) rather than as errors.
//!
//! ```
//! use chrono::NaiveDate;
//! use fxfolio_core::{Asset, FxRate, ValuationEngine};
//! use rust_decimal::Decimal;
//!
//! let date = NaiveDate::from_ymd_opt(2023, 5, 15).unwrap();
//! let assets = vec![Asset::new("Berlin Bonds", "EUR", Decimal::new(500_000, 0), date).unwrap()];
//! let rates = vec![FxRate::new(date, "EUR", Decimal::new(112, 2)).unwrap()];
//!
//! let report = ValuationEngine::default().value(&assets, &rates, date).unwrap();
//! assert_eq!(report.total_value, Decimal::new(560_000, 0));
//! ```

pub mod assets;
pub mod constants;
pub mod diagnostics;
pub mod errors;
pub mod fx;
pub mod import;
pub mod portfolio;
pub mod sample;
pub mod utils;

// Re-export common types
pub use assets::{Asset, NewAsset};
pub use fx::{FxRate, NewFxRate};
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! Portfolio module - valuation of holdings in the home currency.

pub mod valuation;

pub use valuation::{
    calculate_total_value, EvaluatedAsset, ValuationConfig, ValuationEngine, ValuationInputs,
    ValuationReport, ValuationRequest,
};

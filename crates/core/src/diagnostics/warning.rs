//! Non-fatal valuation warnings.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A per-asset anomaly found while valuing a portfolio.
///
/// Warnings never abort a run: a missing rate or an unrepresentable value
/// excludes the asset, a stale rate still values it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ValuationWarning {
    /// No observation on or before the valuation date; the asset is excluded.
    MissingRate { asset: String, currency: String },

    /// The selected observation is older than the staleness threshold.
    StaleRate {
        asset: String,
        currency: String,
        rate_date: NaiveDate,
        valuation_date: NaiveDate,
        age_days: i64,
    },

    /// `amount * rate` does not fit in a decimal; the asset is excluded.
    ValueOverflow { asset: String, currency: String },
}

impl ValuationWarning {
    pub fn missing_rate(asset: impl Into<String>, currency: impl Into<String>) -> Self {
        ValuationWarning::MissingRate {
            asset: asset.into(),
            currency: currency.into(),
        }
    }

    pub fn stale_rate(
        asset: impl Into<String>,
        currency: impl Into<String>,
        rate_date: NaiveDate,
        valuation_date: NaiveDate,
    ) -> Self {
        ValuationWarning::StaleRate {
            asset: asset.into(),
            currency: currency.into(),
            rate_date,
            valuation_date,
            age_days: (valuation_date - rate_date).num_days(),
        }
    }

    pub fn value_overflow(asset: impl Into<String>, currency: impl Into<String>) -> Self {
        ValuationWarning::ValueOverflow {
            asset: asset.into(),
            currency: currency.into(),
        }
    }

    /// True for warnings that drop the asset from the valuation.
    pub fn excludes_asset(&self) -> bool {
        !matches!(self, ValuationWarning::StaleRate { .. })
    }

    pub fn currency(&self) -> &str {
        match self {
            ValuationWarning::MissingRate { currency, .. }
            | ValuationWarning::StaleRate { currency, .. }
            | ValuationWarning::ValueOverflow { currency, .. } => currency,
        }
    }

    pub fn asset(&self) -> &str {
        match self {
            ValuationWarning::MissingRate { asset, .. }
            | ValuationWarning::StaleRate { asset, .. }
            | ValuationWarning::ValueOverflow { asset, .. } => asset,
        }
    }
}

impl fmt::Display for ValuationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuationWarning::MissingRate { asset, currency } => write!(
                f,
                "No FX rate available for {} (asset '{}' excluded)",
                currency, asset
            ),
            ValuationWarning::StaleRate {
                asset,
                currency,
                rate_date,
                valuation_date,
                age_days,
            } => write!(
                f,
                "Stale FX rate for {}: rate date {}, valuation date {} ({} days old, asset '{}')",
                currency, rate_date, valuation_date, age_days, asset
            ),
            ValuationWarning::ValueOverflow { asset, currency } => write!(
                f,
                "Value of asset '{}' is too large to convert from {} (asset excluded)",
                asset, currency
            ),
        }
    }
}

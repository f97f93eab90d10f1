//! Portfolio valuation domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::{Asset, NewAsset};
use crate::constants::{DEFAULT_HOME_CURRENCY, DEFAULT_STALE_RATE_DAYS};
use crate::diagnostics::ValuationWarning;
use crate::errors::{Error, Result, ValidationError};
use crate::fx::{parse_currency_code, FxRate, NewFxRate};
use crate::utils::{decimal_format, time_utils::day_format};

/// Settings for a valuation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuationConfig {
    /// Currency every asset is converted into (default: USD)
    pub home_currency: String,

    /// Rates more than this many days older than the valuation date are
    /// reported as stale (default: 3)
    pub stale_rate_days: i64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            home_currency: DEFAULT_HOME_CURRENCY.to_string(),
            stale_rate_days: DEFAULT_STALE_RATE_DAYS,
        }
    }
}

impl ValuationConfig {
    pub fn new(home_currency: &str, stale_rate_days: i64) -> Result<Self> {
        Self {
            home_currency: home_currency.to_string(),
            stale_rate_days,
        }
        .validated()
    }

    /// Normalizes the home currency and checks the threshold.
    pub fn validated(self) -> Result<Self> {
        if self.stale_rate_days < 0 {
            return Err(ValidationError::InvalidInput(format!(
                "stale rate threshold must not be negative, got {}",
                self.stale_rate_days
            ))
            .into());
        }
        Ok(Self {
            home_currency: parse_currency_code(&self.home_currency)?,
            stale_rate_days: self.stale_rate_days,
        })
    }
}

/// An asset together with its value in the home currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedAsset {
    pub asset: Asset,
    #[serde(with = "decimal_format")]
    pub home_value: Decimal,
    /// The observation used for conversion. `None` for home-currency assets.
    pub rate: Option<FxRate>,
    pub stale: bool,
}

impl EvaluatedAsset {
    /// A home-currency asset: valued at its amount, no FX involved.
    pub fn at_par(asset: Asset) -> Self {
        Self {
            home_value: asset.amount(),
            asset,
            rate: None,
            stale: false,
        }
    }

    /// A foreign asset converted with `rate`. `None` if the home value
    /// overflows a decimal.
    pub fn converted(asset: Asset, rate: FxRate, stale: bool) -> Option<Self> {
        let home_value = asset.amount().checked_mul(rate.rate())?;
        Some(Self {
            home_value,
            asset,
            rate: Some(rate),
            stale,
        })
    }

    /// Date of the rate used, if any.
    pub fn rate_date(&self) -> Option<NaiveDate> {
        self.rate.as_ref().map(FxRate::date)
    }
}

/// The ranked valuation of a portfolio on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    #[serde(with = "day_format")]
    pub valuation_date: NaiveDate,
    pub home_currency: String,
    /// Evaluated assets, highest home value first
    pub assets: Vec<EvaluatedAsset>,
    #[serde(with = "decimal_format")]
    pub total_value: Decimal,
    /// Warnings emitted while producing this report, in emission order
    pub warnings: Vec<ValuationWarning>,
}

impl ValuationReport {
    pub fn stale_count(&self) -> usize {
        self.assets.iter().filter(|a| a.stale).count()
    }

    pub fn excluded_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.excludes_asset()).count()
    }
}

/// Valuation input as read from a JSON document.
///
/// Every part is optional on the wire. Absent collections are rejected when
/// the request is resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    #[serde(default, with = "day_format::option", skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<NaiveDate>,
    #[serde(default)]
    pub assets: Option<Vec<NewAsset>>,
    #[serde(default)]
    pub fx_rates: Option<Vec<NewFxRate>>,
}

/// Validated inputs for one valuation run.
#[derive(Debug, Clone)]
pub struct ValuationInputs {
    pub valuation_date: NaiveDate,
    pub assets: Vec<Asset>,
    pub fx_rates: Vec<FxRate>,
}

impl ValuationRequest {
    pub fn new(assets: Vec<NewAsset>, fx_rates: Vec<NewFxRate>, valuation_date: NaiveDate) -> Self {
        Self {
            valuation_date: Some(valuation_date),
            assets: Some(assets),
            fx_rates: Some(fx_rates),
        }
    }

    /// Sets the valuation date unless the request already carries one.
    pub fn with_default_date(mut self, date: NaiveDate) -> Self {
        self.valuation_date.get_or_insert(date);
        self
    }

    /// Checks that all parts are present and validates every record.
    pub fn resolve(&self) -> Result<ValuationInputs> {
        let assets = self
            .assets
            .as_ref()
            .ok_or_else(|| Error::InvalidArgument("assets must be provided".to_string()))?;
        let fx_rates = self
            .fx_rates
            .as_ref()
            .ok_or_else(|| Error::InvalidArgument("fxRates must be provided".to_string()))?;
        let valuation_date = self
            .valuation_date
            .ok_or_else(|| Error::InvalidArgument("valuationDate must be provided".to_string()))?;

        let assets = assets
            .iter()
            .cloned()
            .map(|a| a.into_asset(valuation_date))
            .collect::<Result<Vec<_>>>()?;
        let fx_rates = fx_rates
            .iter()
            .cloned()
            .map(FxRate::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(ValuationInputs {
            valuation_date,
            assets,
            fx_rates,
        })
    }
}

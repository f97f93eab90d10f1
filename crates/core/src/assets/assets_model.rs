//! Asset domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::fx::parse_currency_code;
use crate::utils::{decimal_format, time_utils::day_format};

/// A holding denominated in a single currency.
///
/// Immutable once constructed: the currency is normalized to upper case and
/// the valuation date carries no time of day.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    name: String,
    currency: String,
    #[serde(with = "decimal_format")]
    amount: Decimal,
    #[serde(with = "day_format")]
    valuation_date: NaiveDate,
}

impl Asset {
    pub fn new(
        name: impl Into<String>,
        currency: &str,
        amount: Decimal,
        valuation_date: NaiveDate,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(Self {
            name,
            currency: parse_currency_code(currency)?,
            amount,
            valuation_date,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }
}

/// Unvalidated asset as read from input documents.
///
/// `valuation_date` may be omitted, in which case the run's valuation date is
/// used.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    pub currency: String,
    #[serde(with = "decimal_format")]
    pub amount: Decimal,
    #[serde(default, with = "day_format::option", skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<NaiveDate>,
}

impl NewAsset {
    /// Validates and builds the asset, filling in `default_date` when the
    /// input has no date of its own.
    pub fn into_asset(self, default_date: NaiveDate) -> Result<Asset> {
        Asset::new(
            self.name,
            &self.currency,
            self.amount,
            self.valuation_date.unwrap_or(default_date),
        )
    }
}

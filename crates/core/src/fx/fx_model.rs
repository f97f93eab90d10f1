use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::parse_currency_code;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::{decimal_format, time_utils::day_format};

/// A dated FX observation: one unit of `currency` is worth `rate` units of
/// the home currency on `date`.
///
/// Fields are private so the currency is always normalized and the rate
/// always positive.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FxRate {
    #[serde(with = "day_format")]
    date: NaiveDate,
    currency: String,
    #[serde(with = "decimal_format")]
    rate: Decimal,
}

impl FxRate {
    pub fn new(date: NaiveDate, currency: &str, rate: Decimal) -> Result<Self> {
        let currency = parse_currency_code(currency)?;
        if rate <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveRate {
                currency,
                rate: rate.to_string(),
            }
            .into());
        }
        Ok(Self {
            date,
            currency,
            rate,
        })
    }

    /// Builds a rate from a timestamp, keeping only its calendar day.
    pub fn observed_at(timestamp: NaiveDateTime, currency: &str, rate: Decimal) -> Result<Self> {
        Self::new(timestamp.date(), currency, rate)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

/// Unvalidated FX observation as read from input documents.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewFxRate {
    #[serde(with = "day_format")]
    pub date: NaiveDate,
    pub currency: String,
    #[serde(with = "decimal_format")]
    pub rate: Decimal,
}

impl TryFrom<NewFxRate> for FxRate {
    type Error = Error;

    fn try_from(value: NewFxRate) -> Result<Self> {
        FxRate::new(value.date, &value.currency, value.rate)
    }
}

impl From<&FxRate> for NewFxRate {
    fn from(rate: &FxRate) -> Self {
        Self {
            date: rate.date,
            currency: rate.currency.clone(),
            rate: rate.rate,
        }
    }
}

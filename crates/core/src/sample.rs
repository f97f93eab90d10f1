//! Built-in demo portfolio.
//!
//! Four holdings across four currencies plus a small FX history, used when
//! no input files are given.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::assets::{Asset, NewAsset};
use crate::errors::Result;
use crate::fx::{FxRate, NewFxRate};

/// The demo holdings, as input records without dates.
pub fn sample_new_assets() -> Vec<NewAsset> {
    [
        ("Tokyo Office", "JPY", Decimal::new(150_000_000, 0)),
        ("Berlin Bonds", "EUR", Decimal::new(500_000, 0)),
        ("London Stock", "GBP", Decimal::new(250_000, 0)),
        ("NYC Treasury", "USD", Decimal::new(1_000_000, 0)),
    ]
    .into_iter()
    .map(|(name, currency, amount)| NewAsset {
        name: name.to_string(),
        currency: currency.to_string(),
        amount,
        valuation_date: None,
    })
    .collect()
}

/// The demo FX history. CAD has no matching holding.
pub fn sample_new_fx_rates() -> Vec<NewFxRate> {
    [
        ((2023, 5, 12), "JPY", Decimal::new(73, 4)),
        ((2023, 5, 11), "EUR", Decimal::new(112, 2)),
        ((2023, 5, 14), "GBP", Decimal::new(125, 2)),
        ((2023, 4, 1), "CAD", Decimal::new(75, 2)),
    ]
    .into_iter()
    .filter_map(|((y, m, d), currency, rate)| {
        NaiveDate::from_ymd_opt(y, m, d).map(|date| NewFxRate {
            date,
            currency: currency.to_string(),
            rate,
        })
    })
    .collect()
}

/// The demo holdings, dated `valuation_date`.
pub fn sample_assets(valuation_date: NaiveDate) -> Result<Vec<Asset>> {
    sample_new_assets()
        .into_iter()
        .map(|a| a.into_asset(valuation_date))
        .collect()
}

pub fn sample_fx_rates() -> Result<Vec<FxRate>> {
    sample_new_fx_rates()
        .into_iter()
        .map(FxRate::try_from)
        .collect()
}

//! FX (Foreign Exchange) module - rate model, currency codes and rate selection.

pub mod currency;
mod fx_model;
mod rate_selection;

pub use currency::{normalize_currency_code, parse_currency_code, same_currency};
pub use fx_model::{FxRate, NewFxRate};
pub use rate_selection::{select_latest_rates, LatestRateMap};

//! Latest-rate selection.

use chrono::NaiveDate;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::fx_model::FxRate;

/// Currency code -> most recent eligible observation.
pub type LatestRateMap<'a> = HashMap<&'a str, &'a FxRate>;

/// Picks, per currency, the most recent observation dated on or before
/// `valuation_date`.
///
/// Observations after the valuation date are never selected. When two
/// observations share the latest date the one seen first wins. Currencies
/// with no eligible observation are absent from the map.
pub fn select_latest_rates(fx_rates: &[FxRate], valuation_date: NaiveDate) -> LatestRateMap<'_> {
    let mut latest: LatestRateMap<'_> = HashMap::new();

    for rate in fx_rates.iter().filter(|r| r.date() <= valuation_date) {
        match latest.entry(rate.currency()) {
            Entry::Vacant(slot) => {
                slot.insert(rate);
            }
            Entry::Occupied(mut slot) => {
                if rate.date() > slot.get().date() {
                    slot.insert(rate);
                }
            }
        }
    }

    latest
}

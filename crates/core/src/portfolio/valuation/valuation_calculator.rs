use crate::assets::Asset;
use crate::diagnostics::{DiagnosticSink, ValuationWarning};
use crate::errors::{Error, Result};
use crate::fx::{same_currency, select_latest_rates, FxRate};
use crate::portfolio::valuation::{EvaluatedAsset, ValuationConfig};
use crate::utils::time_utils::days_between;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

/// Values each asset in the home currency on `valuation_date`.
///
/// Home-currency assets are taken at their amount. Other assets use the
/// latest FX observation dated on or before `valuation_date`; assets with
/// no such observation are left out and reported to `sink`, as are assets
/// whose converted value does not fit in a decimal. A selected rate older
/// than `config.stale_rate_days` is still used but reported as stale.
///
/// The result is ordered by home value, highest first. Equal values keep
/// their input order.
///
/// # Arguments
///
/// * `assets` - The holdings to value, in input order.
/// * `fx_rates` - All known FX observations, any order.
/// * `valuation_date` - The as-of date for rate eligibility and staleness.
/// * `config` - Home currency and staleness threshold.
/// * `sink` - Receiver for missing/stale rate warnings.
///
pub fn evaluate_assets(
    assets: &[Asset],
    fx_rates: &[FxRate],
    valuation_date: NaiveDate,
    config: &ValuationConfig,
    sink: &dyn DiagnosticSink,
) -> Vec<EvaluatedAsset> {
    let latest_rates = select_latest_rates(fx_rates, valuation_date);
    let mut evaluated = Vec::with_capacity(assets.len());

    for asset in assets {
        if same_currency(asset.currency(), &config.home_currency) {
            evaluated.push(EvaluatedAsset::at_par(asset.clone()));
            continue;
        }

        match latest_rates.get(asset.currency()) {
            Some(rate) => {
                let stale = is_stale(rate.date(), valuation_date, config.stale_rate_days);
                let Some(converted) = EvaluatedAsset::converted(asset.clone(), (*rate).clone(), stale)
                else {
                    sink.emit(ValuationWarning::value_overflow(asset.name(), asset.currency()));
                    continue;
                };
                if stale {
                    sink.emit(ValuationWarning::stale_rate(
                        asset.name(),
                        asset.currency(),
                        rate.date(),
                        valuation_date,
                    ));
                }
                evaluated.push(converted);
            }
            None => {
                sink.emit(ValuationWarning::missing_rate(asset.name(), asset.currency()));
            }
        }
    }

    // Vec::sort_by is stable
    evaluated.sort_by(|a, b| b.home_value.cmp(&a.home_value));

    debug!(
        "Valued {} of {} assets in {} on {} using {} currencies with eligible rates.",
        evaluated.len(),
        assets.len(),
        config.home_currency,
        valuation_date,
        latest_rates.len()
    );

    evaluated
}

/// Sums home values exactly. Empty input yields zero.
///
/// Fails with `Error::Calculation` if the sum does not fit in a decimal.
pub fn calculate_total_value(evaluated_assets: &[EvaluatedAsset]) -> Result<Decimal> {
    evaluated_assets
        .iter()
        .try_fold(Decimal::ZERO, |total, evaluated| {
            total.checked_add(evaluated.home_value).ok_or_else(|| {
                Error::Calculation(format!(
                    "portfolio total overflows when adding '{}'",
                    evaluated.asset.name()
                ))
            })
        })
}

/// A rate is stale when it is strictly more than `threshold_days` old.
fn is_stale(rate_date: NaiveDate, valuation_date: NaiveDate, threshold_days: i64) -> bool {
    days_between(rate_date, valuation_date) > threshold_days
}

//! Rendering of valuation reports.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use fxfolio_core::constants::DISPLAY_DECIMAL_PRECISION;
use fxfolio_core::ValuationReport;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a decimal with two places and thousands separators.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let text = format!("{:.*}", DISPLAY_DECIMAL_PRECISION as usize, rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Renders the report as a table followed by the total line.
pub fn render_table(report: &ValuationReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Asset".to_string(),
            "Currency".to_string(),
            "Amount".to_string(),
            format!("Value ({})", report.home_currency),
            "Rate Date".to_string(),
            "Note".to_string(),
        ]);

    for evaluated in &report.assets {
        let rate_date = evaluated
            .rate_date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let note = if evaluated.stale { "stale rate" } else { "" };
        table.add_row(vec![
            evaluated.asset.name().to_string(),
            evaluated.asset.currency().to_string(),
            format_money(evaluated.asset.amount()),
            format_money(evaluated.home_value),
            rate_date,
            note.to_string(),
        ]);
    }

    for index in [2, 3] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    format!(
        "Portfolio valuation as of {} (home currency {})\n{}\nTotal portfolio value: {} {}\n",
        report.valuation_date,
        report.home_currency,
        table,
        format_money(report.total_value),
        report.home_currency
    )
}

/// Renders the report as pretty-printed JSON.
pub fn render_json(report: &ValuationReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

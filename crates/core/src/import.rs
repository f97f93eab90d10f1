//! Loading assets and FX rates from CSV and JSON.
//!
//! CSV files need a header row. Assets use `name,currency,amount` with an
//! optional `valuationDate` column; FX rates use `date,currency,rate`. Column
//! names are matched case-insensitively and may be in any order.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

use crate::assets::Asset;
use crate::errors::{Error, Result};
use crate::fx::FxRate;
use crate::portfolio::ValuationRequest;
use crate::utils::decimal_format::parse_decimal;
use crate::utils::time_utils::parse_day;

/// Column positions resolved from a header row.
struct Columns {
    headers: Vec<String>,
}

impl Columns {
    fn from_record(record: &StringRecord) -> Self {
        Self {
            headers: record
                .iter()
                .map(|h| h.trim().to_ascii_lowercase().replace(['_', ' '], ""))
                .collect(),
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.find(name)
            .ok_or_else(|| Error::Import(format!("missing required column '{}'", name)))
    }
}

fn field<'r>(record: &'r StringRecord, index: usize, row: usize, name: &str) -> Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| Error::Import(format!("row {}: missing value for '{}'", row, name)))
}

fn row_error(row: usize, err: Error) -> Error {
    Error::Import(format!("row {}: {}", row, err))
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(input)
}

/// Reads assets from CSV. Rows without a `valuationDate` get `default_date`.
pub fn load_assets_csv<R: Read>(input: R, default_date: NaiveDate) -> Result<Vec<Asset>> {
    let mut rdr = reader(input);
    let columns = Columns::from_record(rdr.headers()?);
    let name_col = columns.require("name")?;
    let currency_col = columns.require("currency")?;
    let amount_col = columns.require("amount")?;
    let date_col = columns.find("valuationdate");

    let mut assets = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let row = index + 1;
        let record = record?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let name = field(&record, name_col, row, "name")?;
        let currency = field(&record, currency_col, row, "currency")?;
        let amount = parse_decimal(field(&record, amount_col, row, "amount")?)
            .map_err(|e| row_error(row, e.into()))?;
        let valuation_date = match date_col.and_then(|c| record.get(c)) {
            Some(raw) if !raw.is_empty() => parse_day(raw).map_err(|e| row_error(row, e))?,
            _ => default_date,
        };

        let asset = Asset::new(name, currency, amount, valuation_date)
            .map_err(|e| row_error(row, e))?;
        assets.push(asset);
    }

    log::debug!("Loaded {} assets from CSV", assets.len());
    Ok(assets)
}

/// Reads FX observations from CSV.
pub fn load_fx_rates_csv<R: Read>(input: R) -> Result<Vec<FxRate>> {
    let mut rdr = reader(input);
    let columns = Columns::from_record(rdr.headers()?);
    let date_col = columns.require("date")?;
    let currency_col = columns.require("currency")?;
    let rate_col = columns.require("rate")?;

    let mut rates = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let row = index + 1;
        let record = record?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let date = parse_day(field(&record, date_col, row, "date")?)
            .map_err(|e| row_error(row, e))?;
        let currency = field(&record, currency_col, row, "currency")?;
        let rate = parse_decimal(field(&record, rate_col, row, "rate")?)
            .map_err(|e| row_error(row, e.into()))?;

        rates.push(FxRate::new(date, currency, rate).map_err(|e| row_error(row, e))?);
    }

    log::debug!("Loaded {} FX rates from CSV", rates.len());
    Ok(rates)
}

/// Reads a JSON valuation request. Records are validated on resolve.
pub fn load_request_json<R: Read>(input: R) -> Result<ValuationRequest> {
    Ok(serde_json::from_reader(input)?)
}

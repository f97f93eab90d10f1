//! Serde helpers for exact decimal input.
//!
//! Decimals are written as strings so no precision is lost. On input both
//! strings and JSON numbers are accepted. Integers are taken exactly; other
//! numbers arrive as `f64` and are only accepted when their shortest textual
//! form is guaranteed to be the literal that was written. Anything else must
//! be passed as a string.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Every integer below this magnitude is exact in an `f64`.
const F64_EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Significant decimal digits an `f64` always reproduces.
const F64_SAFE_DIGITS: usize = 15;

fn significant_digits(text: &str) -> usize {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.trim_start_matches('0').trim_end_matches('0').len()
}

/// Converts a JSON float, refusing values that may not match the literal.
fn exact_float(value: f64) -> Result<Decimal, String> {
    let text = value.to_string();
    if !value.is_finite()
        || value.abs() >= F64_EXACT_INTEGER_LIMIT
        || significant_digits(&text) > F64_SAFE_DIGITS
    {
        return Err(format!(
            "number {} cannot be read exactly; pass it as a string",
            text
        ));
    }
    parse_decimal(&text).map_err(|e| e.to_string())
}

/// Parses a decimal from text, accepting scientific notation as a fallback.
pub fn parse_decimal(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))
}

pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.normalize().to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match DecimalInput::deserialize(deserializer)? {
        DecimalInput::Text(s) => parse_decimal(&s).map_err(serde::de::Error::custom),
        DecimalInput::Int(i) => Ok(Decimal::from(i)),
        DecimalInput::UInt(u) => Ok(Decimal::from(u)),
        DecimalInput::Float(f) => exact_float(f).map_err(serde::de::Error::custom),
    }
}

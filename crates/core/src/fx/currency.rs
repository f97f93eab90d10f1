//! Currency code handling.

use crate::errors::{Result, ValidationError};

/// Upper-cases and trims a currency code. Does not validate it.
pub fn normalize_currency_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Normalizes a currency code and checks that it is three ASCII letters.
pub fn parse_currency_code(code: &str) -> Result<String> {
    let normalized = normalize_currency_code(code);
    if normalized.len() == 3 && normalized.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(normalized)
    } else {
        Err(ValidationError::InvalidCurrency(code.to_string()).into())
    }
}

/// Case-insensitive comparison of two currency codes.
pub fn same_currency(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

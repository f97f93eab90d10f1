use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::constants::DATE_FORMAT;
use crate::errors::{Result, ValidationError};

/// Default timezone for valuation dates.
/// Used to turn the current UTC instant into "today" when no date is given.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to a valuation date in the given timezone.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Convenience function that uses the default valuation timezone.
pub fn valuation_date_today() -> NaiveDate {
    valuation_date_from_utc(Utc::now(), DEFAULT_VALUATION_TZ)
}

/// Drops the time-of-day from a timestamp.
pub fn to_valuation_date(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Parses a user-entered valuation date in strict `yyyy-MM-dd` form.
pub fn parse_valuation_date(input: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)?)
}

/// Like [`parse_valuation_date`] but a blank input means today.
pub fn parse_valuation_date_or_today(input: &str) -> Result<NaiveDate> {
    if input.trim().is_empty() {
        return Ok(valuation_date_today());
    }
    parse_valuation_date(input)
}

/// Parses a date or timestamp and keeps only the calendar day.
///
/// Accepts `yyyy-MM-dd`, RFC 3339 timestamps and naive
/// `yyyy-MM-ddTHH:MM:SS` / `yyyy-MM-dd HH:MM:SS` timestamps. Offsets are not
/// applied: the date written in the input is the date kept.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.naive_local().date());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(to_valuation_date(ts));
        }
    }

    Err(ValidationError::InvalidInput(format!(
        "Invalid date '{}': expected yyyy-MM-dd or a timestamp",
        input
    ))
    .into())
}

/// Whole calendar days from `earlier` to `later` (negative if reversed).
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Serde helpers for day-granularity dates.
///
/// Serializes as `yyyy-MM-dd`; deserializes anything [`parse_day`] accepts.
pub mod day_format {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_day(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(
            deserializer: D,
        ) -> std::result::Result<Option<NaiveDate>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                Some(s) if !s.trim().is_empty() => {
                    parse_day(&s).map(Some).map_err(serde::de::Error::custom)
                }
                _ => Ok(None),
            }
        }
    }
}

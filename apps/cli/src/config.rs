//! Environment-driven configuration for the CLI.

use std::env;

use anyhow::{Context, Result};
use fxfolio_core::constants::{DEFAULT_HOME_CURRENCY, DEFAULT_STALE_RATE_DAYS};
use fxfolio_core::ValuationConfig;

pub const ENV_HOME_CURRENCY: &str = "FXFOLIO_HOME_CURRENCY";
pub const ENV_STALE_DAYS: &str = "FXFOLIO_STALE_DAYS";
pub const ENV_LOG_FORMAT: &str = "FXFOLIO_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub home_currency: String,
    pub stale_rate_days: i64,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_currency: DEFAULT_HOME_CURRENCY.to_string(),
            stale_rate_days: DEFAULT_STALE_RATE_DAYS,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Reads configuration from the environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let home_currency = lookup(ENV_HOME_CURRENCY)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.home_currency);

        let stale_rate_days = match lookup(ENV_STALE_DAYS).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{} must be a whole number of days, got '{}'", ENV_STALE_DAYS, raw))?,
            None => defaults.stale_rate_days,
        };

        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            home_currency,
            stale_rate_days,
            log_format,
        })
    }

    /// Valuation settings, with command-line overrides applied.
    pub fn valuation_config(
        &self,
        home_currency: Option<&str>,
        stale_rate_days: Option<i64>,
    ) -> Result<ValuationConfig> {
        ValuationConfig::new(
            home_currency.unwrap_or(&self.home_currency),
            stale_rate_days.unwrap_or(self.stale_rate_days),
        )
        .context("invalid valuation settings")
    }
}

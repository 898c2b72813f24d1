//! Environment configuration
//!
//! Values come from the process environment, with a `.env` file loaded
//! first when present.

use std::env;

use crate::error::{EstimatorError, Result};
use crate::pricing::summary::DISPLAY_PLACES;

pub const LOG_ENV: &str = "ESTIMATOR_LOG";
pub const DISPLAY_PLACES_ENV: &str = "ESTIMATOR_DISPLAY_PLACES";

const DEFAULT_LOG_FILTER: &str = "pricing_estimator=info";
const MAX_DISPLAY_PLACES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// tracing-subscriber filter directive, overridden by RUST_LOG
    pub log_filter: String,
    /// Decimal places for display summaries
    pub display_places: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            display_places: DISPLAY_PLACES,
        }
    }
}

impl EstimatorConfig {
    /// Load `.env` (if any) and read the estimator variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_filter = lookup(LOG_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let display_places = match lookup(DISPLAY_PLACES_ENV) {
            Some(raw) => parse_places(&raw)?,
            None => defaults.display_places,
        };

        Ok(Self {
            log_filter,
            display_places,
        })
    }
}

fn parse_places(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|places| *places <= MAX_DISPLAY_PLACES)
        .ok_or_else(|| EstimatorError::Config {
            key: DISPLAY_PLACES_ENV.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EstimatorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EstimatorConfig::default());
        assert_eq!(config.display_places, 2);
        assert_eq!(config.log_filter, "pricing_estimator=info");
    }

    #[test]
    fn test_reads_values() {
        let config = EstimatorConfig::from_lookup(lookup(&[
            (LOG_ENV, "pricing_estimator=trace"),
            (DISPLAY_PLACES_ENV, " 4 "),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "pricing_estimator=trace");
        assert_eq!(config.display_places, 4);
    }

    #[test]
    fn test_blank_log_filter_uses_default() {
        let config = EstimatorConfig::from_lookup(lookup(&[(LOG_ENV, "  ")])).unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_places_rejected() {
        for raw in ["two", "-1", "11"] {
            let result = EstimatorConfig::from_lookup(lookup(&[(DISPLAY_PLACES_ENV, raw)]));
            assert!(
                matches!(result, Err(EstimatorError::Config { ref value, .. }) if value == raw),
                "{raw} should be rejected"
            );
        }
    }
}

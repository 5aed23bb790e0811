//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Services never read environment variables while handling a
//! request, which keeps behaviour consistent across threads and test harnesses.

use crate::constants::{DEFAULT_COUNTER_START, DEFAULT_PREFIX};
use crate::{CoreError, CoreResult};
use acctnum_id::{Prefix, MAX_SEQUENCE};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    default_prefix: Prefix,
    counter_start: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_prefix: DEFAULT_PREFIX.prefix(),
            counter_start: DEFAULT_COUNTER_START,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(default_prefix: Prefix, counter_start: u32) -> CoreResult<Self> {
        if !(1..=MAX_SEQUENCE).contains(&counter_start) {
            return Err(CoreError::InvalidConfig(format!(
                "counter start must be between 1 and {}, got: {}",
                MAX_SEQUENCE, counter_start
            )));
        }

        Ok(Self {
            default_prefix,
            counter_start,
        })
    }

    /// Builds the configuration from raw environment values.
    ///
    /// `None`, empty and whitespace-only values fall back to the defaults.
    pub fn from_env_values(
        default_prefix: Option<String>,
        counter_start: Option<String>,
    ) -> CoreResult<Self> {
        Self::new(
            default_prefix_from_env_value(default_prefix)?,
            counter_start_from_env_value(counter_start)?,
        )
    }

    pub fn default_prefix(&self) -> &Prefix {
        &self.default_prefix
    }

    pub fn counter_start(&self) -> u32 {
        self.counter_start
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the default prefix from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the user prefix.
pub fn default_prefix_from_env_value(value: Option<String>) -> CoreResult<Prefix> {
    match non_blank(value) {
        Some(v) => Prefix::parse(&v)
            .map_err(|e| CoreError::InvalidConfig(format!("default prefix: {}", e))),
        None => Ok(DEFAULT_PREFIX.prefix()),
    }
}

/// Parse the counter start from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns 1. Range checking happens in
/// [`CoreConfig::new`].
pub fn counter_start_from_env_value(value: Option<String>) -> CoreResult<u32> {
    match non_blank(value) {
        Some(v) => v.parse::<u32>().map_err(|e| {
            CoreError::InvalidConfig(format!("counter start '{}' is not a number: {}", v, e))
        }),
        None => Ok(DEFAULT_COUNTER_START),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let cfg = CoreConfig::from_env_values(None, None).unwrap();

        assert_eq!(cfg, CoreConfig::default());
        assert_eq!(cfg.default_prefix().as_str(), "USR");
        assert_eq!(cfg.counter_start(), 1);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = CoreConfig::from_env_values(Some("  ".into()), Some("".into())).unwrap();
        assert_eq!(cfg, CoreConfig::default());
    }

    #[test]
    fn test_values_are_parsed() {
        let cfg = CoreConfig::from_env_values(Some(" txn ".into()), Some("42".into())).unwrap();

        assert_eq!(cfg.default_prefix().as_str(), "TXN");
        assert_eq!(cfg.counter_start(), 42);
    }

    #[test]
    fn test_invalid_prefix_is_a_config_error() {
        let err = CoreConfig::from_env_values(Some("TOOLONG".into()), None).unwrap_err();
        match err {
            CoreError::InvalidConfig(msg) => assert!(msg.starts_with("default prefix")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_counter_start_is_rejected() {
        assert!(matches!(
            counter_start_from_env_value(Some("ten".into())),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_counter_start_out_of_range_is_rejected() {
        for raw in ["0", "10000"] {
            assert!(matches!(
                CoreConfig::from_env_values(None, Some(raw.into())),
                Err(CoreError::InvalidConfig(_))
            ));
        }
    }
}

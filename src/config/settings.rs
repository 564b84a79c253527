//! # Settings
//!
//! Decoder and observability settings, loadable from environment variables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::{Error, Result};

/// Order in which a container's child keys are visited during dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrder {
    /// Lexicographic by key, reproducible across runs
    #[default]
    Sorted,

    /// The order the JSON parser produced the keys in
    Document,
}

impl FromStr for KeyOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sorted" => Ok(KeyOrder::Sorted),
            "document" => Ok(KeyOrder::Document),
            other => Err(Error::config(format!(
                "Unknown key order '{}'. Use 'sorted' or 'document'.",
                other
            ))),
        }
    }
}

impl fmt::Display for KeyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyOrder::Sorted => write!(f, "sorted"),
            KeyOrder::Document => write!(f, "document"),
        }
    }
}

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Child key iteration order
    pub key_order: KeyOrder,

    /// Lift fields that were simply absent into the diagnostics list.
    /// Type mismatches are reported regardless.
    pub report_missing: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { key_order: KeyOrder::Sorted, report_missing: true }
    }
}

impl DecodeConfig {
    /// Set the key iteration order
    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    /// Set whether absent fields are reported
    pub fn with_report_missing(mut self, report_missing: bool) -> Self {
        self.report_missing = report_missing;
        self
    }

    /// Create DecodeConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let key_order = match std::env::var("AS3DECL_KEY_ORDER") {
            Ok(value) => value.parse::<KeyOrder>()?,
            Err(_) => KeyOrder::default(),
        };

        let report_missing = match std::env::var("AS3DECL_REPORT_MISSING") {
            Ok(value) => parse_bool("AS3DECL_REPORT_MISSING", &value)?,
            Err(_) => true,
        };

        Ok(Self { key_order, report_missing })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(
        length(min = 1, message = "Log level cannot be empty"),
        custom(function = "validate_log_level")
    )]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "warn".to_string(), json_logging: false }
    }
}

impl ObservabilityConfig {
    /// Create ObservabilityConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let log_level =
            std::env::var("AS3DECL_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        let json_logging = match std::env::var("AS3DECL_JSON_LOGGING") {
            Ok(value) => parse_bool("AS3DECL_JSON_LOGGING", &value)?,
            Err(_) => false,
        };

        let config = Self { log_level, json_logging };
        config.validate()?;
        Ok(config)
    }
}

fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
        // Empty levels are rejected by the length rule.
        "" => Ok(()),
        _ => {
            let mut error = ValidationError::new("log_level");
            error.message =
                Some("Log level must be one of trace, debug, info, warn, error, off".into());
            Err(error)
        }
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(Error::config(format!("Invalid boolean for {}: '{}'", var, other))),
    }
}

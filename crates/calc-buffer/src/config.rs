//! Engine configuration
//!
//! Defaults reproduce the stock keypad: a 200 character buffer, `0` for an
//! empty display and `Error` after a failed evaluation. A JSON document may
//! override any subset of the fields.
//!
//! The capacity has a floor of [`EngineConfig::MIN_MAX_LENGTH`] so that a
//! result written back by `=` always fits in the buffer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading an [`EngineConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed but semantically invalid
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-configuration error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Configuration for the expression buffer engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of characters the buffer may hold
    pub max_length: usize,
    /// Text shown after a failed evaluation
    pub error_marker: String,
    /// Text shown while the buffer is empty
    pub empty_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_length: Self::DEFAULT_MAX_LENGTH,
            error_marker: Self::DEFAULT_ERROR_MARKER.to_string(),
            empty_marker: Self::DEFAULT_EMPTY_MARKER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Default buffer capacity in characters
    pub const DEFAULT_MAX_LENGTH: usize = 200;
    /// Default error marker
    pub const DEFAULT_ERROR_MARKER: &'static str = "Error";
    /// Default empty-display marker
    pub const DEFAULT_EMPTY_MARKER: &'static str = "0";
    /// Smallest accepted capacity; every formatted `f64` fits in it
    pub const MIN_MAX_LENGTH: usize = 32;

    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the buffer capacity
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set the error marker
    #[must_use]
    pub fn with_error_marker(mut self, marker: impl Into<String>) -> Self {
        self.error_marker = marker.into();
        self
    }

    /// Set the empty-display marker
    #[must_use]
    pub fn with_empty_marker(mut self, marker: impl Into<String>) -> Self {
        self.empty_marker = marker.into();
        self
    }

    /// Checks invariants that serde cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_length < Self::MIN_MAX_LENGTH {
            return Err(ConfigError::invalid(format!(
                "max_length must be at least {}, got {}",
                Self::MIN_MAX_LENGTH,
                self.max_length
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

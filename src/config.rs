//! Configuration for fieldkit
//!
//! Centralized configuration with sensible defaults, overridable from the
//! environment.

use crate::error::{FieldkitError, Result};

/// Environment variable toggling `trace_dropped_keys`
pub const ENV_TRACE_DROPPED_KEYS: &str = "FIELDKIT_TRACE_DROPPED_KEYS";

/// Environment variable setting `max_text_key_len`
pub const ENV_MAX_TEXT_KEY_LEN: &str = "FIELDKIT_MAX_TEXT_KEY_LEN";

/// Projection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Logging
    // -------------------------------------------------------------------------
    /// Emit a debug event for each key dropped during projection
    pub trace_dropped_keys: bool,

    // -------------------------------------------------------------------------
    // Untrusted Input
    // -------------------------------------------------------------------------
    /// Textual keys longer than this are dropped without a symbol lookup
    pub max_text_key_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_dropped_keys: false,
            max_text_key_len: 256,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Defaults overridden by any `FIELDKIT_*` variables that are set
    pub fn from_env() -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(raw) = env_var(ENV_TRACE_DROPPED_KEYS) {
            builder = builder.trace_dropped_keys(parse_flag(ENV_TRACE_DROPPED_KEYS, &raw)?);
        }

        if let Some(raw) = env_var(ENV_MAX_TEXT_KEY_LEN) {
            let len = raw.trim().parse::<usize>().map_err(|e| {
                FieldkitError::Config(format!("{}={:?}: {}", ENV_MAX_TEXT_KEY_LEN, raw, e))
            })?;
            builder = builder.max_text_key_len(len);
        }

        Ok(builder.build())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Log every key dropped during projection
    pub fn trace_dropped_keys(mut self, enabled: bool) -> Self {
        self.config.trace_dropped_keys = enabled;
        self
    }

    /// Set the textual key length limit (in bytes)
    pub fn max_text_key_len(mut self, len: usize) -> Self {
        self.config.max_text_key_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

// =============================================================================
// Environment Lookup
// =============================================================================

/// Read an environment variable; unset or non-unicode reads as `None`
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read an environment variable that must be set
pub fn try_env_var(name: &str) -> Result<String> {
    env_var(name).ok_or_else(|| FieldkitError::Config(format!("{} is not set", name)))
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FieldkitError::Config(format!(
            "{}={:?}: expected a boolean",
            name, raw
        ))),
    }
}

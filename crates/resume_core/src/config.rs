//! Store configuration.
//!
//! # Responsibility
//! - Hold the durable slot key and debounce delay used by the store.
//! - Load host-supplied overrides from JSON, defaulting missing fields.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Durable slot key holding the serialized document.
pub const DEFAULT_STORAGE_KEY: &str = "interactive_res_builder_v1";
/// Quiet period before a scheduled document write fires.
pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 600;
const THEME_KEY_SUFFIX: &str = "_theme";

/// Configuration for one document store instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub storage_key: String,
    pub save_debounce_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
        }
    }
}

impl StoreConfig {
    /// Parses a JSON config object. Missing fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        if config.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(config)
    }

    pub fn with_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.save_debounce_ms = delay_ms;
        self
    }

    /// Key of the theme slot, derived from the document key.
    pub fn theme_key(&self) -> String {
        format!("{}{THEME_KEY_SUFFIX}", self.storage_key)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid store config: {err}"),
            Self::EmptyStorageKey => write!(f, "storage_key cannot be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::EmptyStorageKey => None,
        }
    }
}

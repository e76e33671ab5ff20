//! Journal persistence configuration.
//!
//! # Invariants
//! - Draft and entry slots use distinct, non-empty keys.
//! - `max_entries` is at least one.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_DRAFT_KEY: &str = "mistakes-journal:draft";
pub const DEFAULT_ENTRIES_KEY: &str = "mistakes-journal:entries";
pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    EmptyKey(&'static str),
    SharedKey(String),
    ZeroMaxEntries,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid journal config: {message}"),
            Self::EmptyKey(field) => write!(f, "`{field}` cannot be empty"),
            Self::SharedKey(key) => {
                write!(f, "draft and entries cannot share storage key `{key}`")
            }
            Self::ZeroMaxEntries => write!(f, "`max_entries` must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

/// Storage keys, debounce window and retention bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub draft_key: String,
    pub entries_key: String,
    /// Draft save debounce window in milliseconds; `0` writes immediately.
    pub debounce_ms: u64,
    pub max_entries: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            draft_key: DEFAULT_DRAFT_KEY.to_string(),
            entries_key: DEFAULT_ENTRIES_KEY.to_string(),
            debounce_ms: 0,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl JournalConfig {
    /// Parses a JSON config; missing fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.draft_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey("draft_key"));
        }
        if self.entries_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey("entries_key"));
        }
        if self.draft_key == self.entries_key {
            return Err(ConfigError::SharedKey(self.draft_key.clone()));
        }
        if self.max_entries == 0 {
            return Err(ConfigError::ZeroMaxEntries);
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Builder-style override of the debounce window.
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }
}

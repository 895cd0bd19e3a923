//! Configuration module
//!
//! The hosting page hands the controller its settings as a JSON blob
//! (typically a `data-*` attribute or an embedded script node).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants;
use crate::error::ConfigError;

/// Controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Search endpoint URL; search stays disabled when empty
    pub search_url: String,

    /// Search box debounce (ms)
    pub search_debounce_ms: u64,

    /// Table free-text filter debounce (ms)
    pub filter_debounce_ms: u64,

    /// Minimum trimmed query length
    pub min_query_len: usize,

    /// Counter animation duration (ms)
    pub counter_duration_ms: u64,

    /// Request timeout; `None` keeps the transport default
    pub request_timeout_secs: Option<u64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            search_url: String::new(),
            search_debounce_ms: constants::DEFAULT_SEARCH_DEBOUNCE_MS,
            filter_debounce_ms: constants::DEFAULT_FILTER_DEBOUNCE_MS,
            min_query_len: constants::DEFAULT_MIN_QUERY_LEN,
            counter_duration_ms: constants::DEFAULT_COUNTER_DURATION_MS,
            request_timeout_secs: None,
        }
    }
}

impl ViewConfig {
    /// Load configuration from the page-supplied JSON
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ViewConfig = serde_json::from_str(raw)?;
        config.validate()?;
        log::info!(
            "View config loaded: search_url={}, debounce={}ms/{}ms",
            config.search_url,
            config.search_debounce_ms,
            config.filter_debounce_ms
        );
        Ok(config)
    }

    /// Config pointing at a search endpoint, everything else default
    pub fn with_search_url(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_url.trim().is_empty() {
            return Err(ConfigError::Invalid("search_url is required".to_string()));
        }
        if self.min_query_len == 0 {
            return Err(ConfigError::Invalid("min_query_len must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

//! Error handling

use thiserror::Error;

pub type LookupResult<T> = Result<T, SearchError>;

/// Search lookup errors
///
/// `Superseded` is not a failure: it marks a lookup that a newer keystroke
/// replaced and must never reach the screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Lookup superseded by a newer query")]
    Superseded,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl SearchError {
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchError::Superseded)
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            SearchError::Status(status.as_u16())
        } else {
            SearchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Malformed(err.to_string())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

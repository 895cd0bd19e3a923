//! Search Types

use serde::{Deserialize, Deserializer, Serialize};

pub use crate::logic::record::{RiskLevel, RiskRecord};

// ============================================================================
// WIRE TYPES
// ============================================================================

/// One entry of the search endpoint's payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(deserialize_with = "string_or_number")]
    pub customer_id: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub geography: String,
    #[serde(default)]
    pub gender: String,
    pub risk_score: f64,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub driver: String,
    pub risk_url: String,
}

impl SearchResult {
    /// Project a record into a result pointing at `risk_url`
    pub fn from_record(record: &RiskRecord, driver: impl Into<String>, risk_url: impl Into<String>) -> Self {
        Self {
            customer_id: record.customer_id.clone(),
            surname: record.surname.clone(),
            geography: record.geography.clone(),
            gender: record.gender.clone(),
            risk_score: record.risk_score,
            risk_level: record.risk_level.as_str().to_string(),
            driver: driver.into(),
            risk_url: risk_url.into(),
        }
    }
}

/// Search endpoint response body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub results: Vec<SearchResult>,
}

/// Customer ids arrive as numbers from some backends
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}

// ============================================================================
// SESSION & RENDER STATE
// ============================================================================

/// Lifecycle of the current search session
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Debouncing,
    InFlight,
    Rendered,
    Failed,
    Cancelled,
    SilentlyDropped,
}

/// One rendered, navigable result entry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderedResult {
    pub index: usize,
    pub customer_id: String,
    /// `<risk_url>?q=<customer_id>`
    pub href: String,
    /// Escaped markup for the entry
    pub html: String,
}

/// What the result dropdown currently shows
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ResultList {
    Hidden,
    Entries(Vec<RenderedResult>),
    NoMatches,
    Unavailable,
}

impl ResultList {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultList::Hidden)
    }

    /// Navigable entries; placeholders have none
    pub fn entries(&self) -> &[RenderedResult] {
        match self {
            ResultList::Entries(entries) => entries,
            _ => &[],
        }
    }
}

/// Keys the result list reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other(String),
}

impl Key {
    /// Map a browser `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Key::ArrowDown,
            "ArrowUp" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Result of handling a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; default action must not be prevented
    Ignored,
    /// Handled; host should prevent the default action
    Handled,
    /// Handled; host should navigate to the url
    Navigate(String),
}

impl KeyOutcome {
    pub fn prevents_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

/// Where a pointer interaction landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Input,
    ResultList,
    Elsewhere,
}

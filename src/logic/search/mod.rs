//! Remote Search Module - Global Customer Search Box
//!
//! This module handles:
//! - Debouncing keystrokes into a single lookup
//! - Cancelling superseded requests
//! - Rendering escaped, navigable result entries
//! - Keyboard navigation and dismissal of the result list

pub mod client;
pub mod engine;
pub mod render;
pub mod types;

pub use client::{HttpTransport, SearchTransport};
pub use engine::SearchEngine;
pub use types::{
    Key, KeyOutcome, PointerTarget, RenderedResult, ResultList, RiskLevel, RiskRecord,
    SearchPayload, SearchResult, SessionState,
};

use crate::config::ViewConfig;
use crate::error::LookupResult;

/// Build an engine talking to the configured HTTP endpoint
pub fn http_engine(config: &ViewConfig) -> LookupResult<SearchEngine<HttpTransport>> {
    let transport = HttpTransport::new(config)?;
    log::info!("Search engine ready: {}", transport.search_url());
    Ok(SearchEngine::new(transport, config))
}

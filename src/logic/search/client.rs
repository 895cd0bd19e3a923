//! Search API Client
//!
//! Transport seam between the search engine and the search endpoint.
//! `GET <search_url>?q=<query>` answering `{ "results": [...] }`.

use std::future::Future;
use tokio_util::sync::CancellationToken;

use super::types::SearchPayload;
use crate::config::ViewConfig;
use crate::error::{LookupResult, SearchError};

/// Anything that can answer a search query
///
/// Implementations must stop work and return `SearchError::Superseded`
/// as soon as `cancel` fires.
pub trait SearchTransport: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> impl Future<Output = LookupResult<SearchPayload>> + Send;
}

/// HTTP transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    search_url: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create new transport for the configured endpoint
    pub fn new(config: &ViewConfig) -> LookupResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            search_url: config.search_url.clone(),
            http_client,
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Full request URL with the query escaped
    pub fn request_url(&self, query: &str) -> String {
        let separator = if self.search_url.contains('?') { '&' } else { '?' };
        format!("{}{}q={}", self.search_url, separator, urlencoding::encode(query))
    }

    async fn fetch(&self, query: &str) -> LookupResult<SearchPayload> {
        let url = self.request_url(query);
        log::debug!("Search request: {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            log::warn!("Search endpoint returned {}", status);
            return Err(SearchError::Status(status));
        }

        let body = response.bytes().await?;

        Ok(serde_json::from_slice::<SearchPayload>(&body)?)
    }
}

impl SearchTransport for HttpTransport {
    fn search(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> impl Future<Output = LookupResult<SearchPayload>> + Send {
        let query = query.to_string();
        async move {
            // Dropping the losing branch drops the reqwest future, which aborts the request
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(SearchError::Superseded),
                result = self.fetch(&query) => result,
            }
        }
    }
}

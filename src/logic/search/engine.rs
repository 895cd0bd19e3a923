//! Search Engine - debounced, cancellable remote lookups
//!
//! Session lifecycle:
//!
//! ```text
//! Idle ─► Debouncing ─► InFlight ─► Rendered | Failed | SilentlyDropped
//!              │            │
//!              └────────────┴──► Cancelled   (newer keystroke)
//! ```
//!
//! Every keystroke bumps the session token and cancels the previous
//! request before anything new is issued. A completion only renders when
//! its token is still the current one, so a slow, aborted request can
//! never overwrite a newer list.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::client::SearchTransport;
use super::render::render_results;
use super::types::{
    Key, KeyOutcome, PointerTarget, ResultList, SearchPayload, SearchResult, SessionState,
};
use crate::config::ViewConfig;
use crate::error::{LookupResult, SearchError};
use crate::logic::scheduler::Debouncer;

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug)]
struct EngineState {
    query: String,
    session: u64,
    state: SessionState,
    cancel: Option<CancellationToken>,
    results: Vec<SearchResult>,
    list: ResultList,
    active_index: Option<usize>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            query: String::new(),
            session: 0,
            state: SessionState::Idle,
            cancel: None,
            results: Vec::new(),
            list: ResultList::Hidden,
            active_index: None,
        }
    }

    /// Invalidate the current session and abort its request
    fn supersede(&mut self) -> u64 {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.session += 1;
        self.session
    }

    fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::Debouncing | SessionState::InFlight)
    }

    fn hide(&mut self) {
        self.results.clear();
        self.active_index = None;
        self.list = ResultList::Hidden;
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Remote search controller; clones share the same session
pub struct SearchEngine<T: SearchTransport> {
    transport: Arc<T>,
    min_query_len: usize,
    inner: Arc<Mutex<EngineState>>,
    debouncer: Debouncer,
    list_tx: Arc<watch::Sender<ResultList>>,
}

impl<T: SearchTransport> Clone for SearchEngine<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            min_query_len: self.min_query_len,
            inner: self.inner.clone(),
            debouncer: self.debouncer.clone(),
            list_tx: self.list_tx.clone(),
        }
    }
}

impl<T: SearchTransport> SearchEngine<T> {
    pub fn new(transport: T, config: &ViewConfig) -> Self {
        let (list_tx, _) = watch::channel(ResultList::Hidden);
        Self {
            transport: Arc::new(transport),
            min_query_len: config.min_query_len,
            inner: Arc::new(Mutex::new(EngineState::new())),
            debouncer: Debouncer::new(config.search_debounce()),
            list_tx: Arc::new(list_tx),
        }
    }

    /// Called on every input event of the search box
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_query_change(&self, raw_text: &str) {
        let query = raw_text.trim().to_string();

        if query.chars().count() < self.min_query_len {
            self.debouncer.cancel();
            {
                let mut state = self.inner.lock();
                if state.is_pending() {
                    log::debug!("Search session {} cancelled", state.session);
                }
                state.supersede();
                state.state = SessionState::Idle;
                state.query = query;
                state.hide();
            }
            self.publish();
            return;
        }

        let session = {
            let mut state = self.inner.lock();
            if state.is_pending() {
                log::debug!("Search session {} cancelled", state.session);
            }
            let session = state.supersede();
            state.state = SessionState::Debouncing;
            state.query = query.clone();
            log::debug!("Search session {} debouncing: {:?}", session, query);
            session
        };

        let engine = self.clone();
        self.debouncer.schedule(async move {
            // The request outlives the debounce slot; it is cancelled through its token
            tokio::spawn(async move {
                engine.lookup_session(session, &query).await;
            });
        });
    }

    /// Cancel whatever is outstanding, then run one lookup for `query`
    ///
    /// Returns the state the session ended in. A lookup whose request was
    /// aborted reports `Cancelled`; one whose answer arrived after a newer
    /// session took over reports `SilentlyDropped`. Neither renders.
    pub async fn lookup(&self, query: &str) -> SessionState {
        let session = self.inner.lock().supersede();
        self.lookup_session(session, query).await
    }

    /// Run the lookup for `session`, unless a newer keystroke already replaced it
    async fn lookup_session(&self, session: u64, query: &str) -> SessionState {
        let cancel = {
            let mut state = self.inner.lock();
            if state.session != session {
                log::debug!("Search session {} superseded before its request", session);
                return SessionState::Cancelled;
            }
            let cancel = CancellationToken::new();
            state.cancel = Some(cancel.clone());
            state.state = SessionState::InFlight;
            state.query = query.to_string();
            cancel
        };

        log::debug!("Search session {} in flight: {:?}", session, query);
        let result = self.transport.search(query, cancel).await;
        self.complete(session, result)
    }

    fn complete(&self, session: u64, result: LookupResult<SearchPayload>) -> SessionState {
        let outcome = {
            let mut state = self.inner.lock();

            if state.session != session {
                if matches!(result, Err(SearchError::Superseded)) {
                    return SessionState::Cancelled;
                }
                log::debug!("Dropping stale result for session {} (current {})", session, state.session);
                return SessionState::SilentlyDropped;
            }
            state.cancel = None;

            match result {
                Ok(payload) => {
                    log::info!("Search {:?}: {} result(s)", state.query, payload.results.len());
                    state.list = render_results(&payload.results);
                    state.results = payload.results;
                    state.active_index = None;
                    state.state = SessionState::Rendered;
                }
                Err(SearchError::Superseded) => {
                    state.state = SessionState::SilentlyDropped;
                    return SessionState::SilentlyDropped;
                }
                Err(e) => {
                    log::warn!("Search {:?} failed: {}", state.query, e);
                    state.results.clear();
                    state.active_index = None;
                    state.list = ResultList::Unavailable;
                    state.state = SessionState::Failed;
                }
            }
            state.state
        };

        self.publish();
        outcome
    }

    /// Keyboard handling for the search input
    pub fn on_key(&self, key: &Key) -> KeyOutcome {
        let outcome = {
            let mut state = self.inner.lock();
            let count = state.list.entries().len();
            if count == 0 {
                return KeyOutcome::Ignored;
            }

            match key {
                Key::ArrowDown => {
                    state.active_index = Some(match state.active_index {
                        Some(i) => (i + 1) % count,
                        None => 0,
                    });
                    KeyOutcome::Handled
                }
                Key::ArrowUp => {
                    state.active_index = Some(match state.active_index {
                        Some(i) => (i + count - 1) % count,
                        None => count - 1,
                    });
                    KeyOutcome::Handled
                }
                Key::Enter => {
                    let index = state.active_index.filter(|i| *i < count).unwrap_or(0);
                    let href = state.list.entries()[index].href.clone();
                    log::info!("Opening search result {}: {}", index, href);
                    return KeyOutcome::Navigate(href);
                }
                Key::Escape => {
                    state.hide();
                    KeyOutcome::Handled
                }
                Key::Other(_) => return KeyOutcome::Ignored,
            }
        };

        if matches!(key, Key::Escape) {
            self.publish();
        }
        outcome
    }

    /// Pointer press anywhere on the page
    pub fn on_pointer_down(&self, target: PointerTarget) {
        if target != PointerTarget::Elsewhere {
            return;
        }
        let was_visible = {
            let mut state = self.inner.lock();
            let visible = state.list.is_visible();
            state.hide();
            visible
        };
        if was_visible {
            self.publish();
        }
    }

    // ========================================================================
    // READ-ONLY VIEW
    // ========================================================================

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn query(&self) -> String {
        self.inner.lock().query.clone()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.inner.lock().active_index
    }

    pub fn result_list(&self) -> ResultList {
        self.inner.lock().list.clone()
    }

    pub fn results(&self) -> Vec<SearchResult> {
        self.inner.lock().results.clone()
    }

    /// Watch the rendered list; receivers see every published change
    pub fn subscribe(&self) -> watch::Receiver<ResultList> {
        self.list_tx.subscribe()
    }

    fn publish(&self) {
        let list = self.inner.lock().list.clone();
        self.list_tx.send_replace(list);
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Live Table - the view controller wired to page events
//!
//! Select controls apply immediately; typing in the free-text box is
//! debounced so a burst of keystrokes filters once.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

use super::controller::ViewController;
use super::types::{FilterControls, SortColumn, TableRow, ViewSummary};
use super::sort::SortState;
use crate::config::ViewConfig;
use crate::logic::scheduler::Debouncer;

/// Current time on the runtime clock (follows paused time in tests)
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

#[derive(Clone)]
pub struct LiveTable {
    view: Arc<Mutex<ViewController>>,
    debouncer: Debouncer,
}

impl LiveTable {
    pub fn new(rows: Vec<TableRow>, config: &ViewConfig) -> Self {
        Self::from_controller(
            ViewController::new(rows, config.counter_duration()),
            config,
        )
    }

    pub fn from_controller(view: ViewController, config: &ViewConfig) -> Self {
        Self {
            view: Arc::new(Mutex::new(view)),
            debouncer: Debouncer::new(config.filter_debounce()),
        }
    }

    /// A select control changed; re-filter right away
    ///
    /// A snapshot without a text box value keeps the text already typed.
    pub fn on_control_change(&self, mut controls: FilterControls) -> ViewSummary {
        self.debouncer.cancel();
        let mut view = self.view.lock();
        if controls.query.is_none() {
            controls.query = view.controls().query.clone();
        }
        view.apply_controls(controls, now())
    }

    /// Text typed into the free-text filter box
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_query_input(&self, text: &str) {
        self.view.lock().set_query_text(Some(text.to_string()));

        let view = self.view.clone();
        self.debouncer.schedule(async move {
            let summary = view.lock().refresh(now());
            log::debug!("Query filter applied: {} visible", summary.visible);
        });
    }

    /// Sort header clicked
    pub fn on_header_click(&self, column: SortColumn) -> SortState {
        self.view.lock().sort_by(column)
    }

    /// One animation frame; true while counters still need frames
    pub fn frame(&self) -> bool {
        self.view.lock().tick(now())
    }

    /// True while a typed query is waiting to be applied
    pub fn is_filter_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Read the current view under the lock
    pub fn with_view<R>(&self, f: impl FnOnce(&ViewController) -> R) -> R {
        f(&self.view.lock())
    }
}

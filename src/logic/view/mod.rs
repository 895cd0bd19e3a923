//! Table View Module - Risk Table Filter, Sort & Summary
//!
//! This module handles:
//! - Showing/hiding rows against the filter controls
//! - Sorting by risk score or balance and re-labelling ranks
//! - Animating the summary counters towards the visible totals

pub mod controller;
pub mod counter;
pub mod filter;
pub mod live;
pub mod sort;
pub mod types;

pub use controller::ViewController;
pub use counter::{AnimatedCounter, CounterBoard};
pub use live::LiveTable;
pub use sort::SortState;
pub use types::{
    ActiveFlag, AuditRow, FilterControls, FilterCriteria, LevelCounts, RiskBadge, SortColumn,
    TableRow, ViewSummary,
};

//! Central Configuration Constants
//!
//! Single source of truth for all controller defaults.
//! Hosting pages override these through `ViewConfig`.

/// Minimum trimmed query length before a remote lookup is attempted
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Debounce window for the global search box (milliseconds)
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 280;

/// Debounce window for the table's free-text filter (milliseconds)
pub const DEFAULT_FILTER_DEBOUNCE_MS: u64 = 300;

/// Duration of one summary counter animation (milliseconds)
pub const DEFAULT_COUNTER_DURATION_MS: u64 = 300;

/// Ranks at or above this position get the top-3 marker
pub const TOP_RANK_COUNT: usize = 3;

/// Score thresholds used to derive a risk level
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
pub const MEDIUM_RISK_THRESHOLD: f64 = 40.0;

// ============================================
// Placeholder messages
// ============================================

/// Shown when a lookup succeeds with zero results
pub const NO_MATCHES_MESSAGE: &str = "No customer matches found.";

/// Shown for any transport failure
pub const UNAVAILABLE_MESSAGE: &str = "Search temporarily unavailable.";

// ============================================
// Rendered element ids
// ============================================

pub const COUNTER_TOTAL_ID: &str = "cnt-total";
pub const COUNTER_HIGH_ID: &str = "cnt-high";
pub const COUNTER_MEDIUM_ID: &str = "cnt-medium";
pub const COUNTER_LOW_ID: &str = "cnt-low";

/// Row status text that marks an active customer
pub const ACTIVE_STATUS_TEXT: &str = "Active";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

//! Risk View - Customer Search, Filter & Sort Controller
//!
//! Two independent controllers for the risk dashboard:
//! - `logic::search` - the global search box (debounced remote lookup,
//!   stale-response rejection, keyboard navigation)
//! - `logic::view` - the risk table (client-side filters, column sort,
//!   rank labels, animated summary counters)

pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::ViewConfig;
pub use error::{ConfigError, LookupResult, SearchError};
pub use logic::search::{http_engine, HttpTransport, SearchEngine, SearchTransport};
pub use logic::view::{LiveTable, ViewController};

/// Install the env_logger backend (`RUST_LOG`, default `info`)
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    log::debug!("Risk View v{} logging ready", constants::APP_VERSION);
}

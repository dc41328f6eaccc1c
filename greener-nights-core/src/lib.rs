//! Core of greener-nights.
//!
//! Merges dated greener-night records into a persistent `.ics` calendar:
//! - `record` reads the forecast feed
//! - `event_data` and `store` convert records into calendar events
//! - `diff` decides whether a stored event needs replacing
//! - `merge` reconciles a batch of records with the store, never deleting
//! - `sync` runs one load/merge/save cycle

pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod event_data;
pub mod ics;
pub mod merge;
pub mod record;
pub mod store;
pub mod sync;

pub use config::SyncConfig;
pub use error::{GreenerNightsError, GreenerNightsResult};
pub use merge::{MergeOutcome, MergeStats, merge};
pub use record::Record;
pub use sync::{SyncOptions, sync};

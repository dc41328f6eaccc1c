//! One complete merge run: load, merge, write.

use chrono::{DateTime, Utc};

use crate::config::SyncConfig;
use crate::error::GreenerNightsResult;
use crate::merge::{MergeOutcome, merge};
use crate::record::load_records;
use crate::store::CalendarStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Compute the merge without writing the store.
    pub dry_run: bool,
}

/// Merge the configured feed into the configured store, timestamped now.
pub fn sync(config: &SyncConfig, options: SyncOptions) -> GreenerNightsResult<MergeOutcome> {
    sync_at(config, options, Utc::now())
}

/// [`sync`] with an explicit run time.
///
/// The store is written at most once, after every record has merged; any
/// error leaves the file on disk as it was.
pub fn sync_at(
    config: &SyncConfig,
    options: SyncOptions,
    now: DateTime<Utc>,
) -> GreenerNightsResult<MergeOutcome> {
    let store_path = config.store_path();
    let input_path = config.input_path();

    let store = CalendarStore::load(&store_path)?;
    let records = load_records(&input_path)?;
    let outcome = merge(store, &records, now)?;

    if options.dry_run {
        tracing::info!(path = %store_path.display(), "dry run, calendar store left untouched");
    } else {
        outcome.store.save(&store_path)?;
    }

    Ok(outcome)
}

//! Reconciliation of incoming records with the persisted calendar.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::{ChangeKind, RecordChange, has_changed};
use crate::error::{GreenerNightsError, GreenerNightsResult};
use crate::event_data::EventData;
use crate::record::Record;
use crate::store::{CalendarStore, EventKey, PersistedEvent};

/// Counts reported after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    pub new: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Stored events whose UID was absent from this batch.
    pub preserved: usize,
    /// Events in the resulting store.
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub store: CalendarStore,
    pub stats: MergeStats,
    /// One entry per distinct incoming record, in feed order.
    pub changes: Vec<RecordChange>,
}

/// Merge `records` into `existing`, producing the store to persist.
///
/// Events are added or replaced, never removed. Every record is classified
/// against the store as it was before the run, so the result does not
/// depend on feed order. All records are validated before anything is
/// built: on error the caller gets no store at all.
pub fn merge(
    existing: CalendarStore,
    records: &[Record],
    now: DateTime<Utc>,
) -> GreenerNightsResult<MergeOutcome> {
    let derived = records
        .iter()
        .enumerate()
        .map(|(index, record)| EventData::from_record(record, index))
        .collect::<GreenerNightsResult<Vec<_>>>()?;
    let derived = dedupe(derived)?;

    let mut store = existing.clone();
    if store.is_empty() {
        store.reset_metadata();
    }

    let mut stats = MergeStats::default();
    let mut seen = HashSet::new();
    let mut changes = Vec::with_capacity(derived.len());

    for data in &derived {
        let key = EventKey::for_uid(&data.uid);

        let kind = match existing.get(&key) {
            None => {
                store.insert(PersistedEvent::from_event_data(data, None, now));
                stats.new += 1;
                ChangeKind::Create
            }
            Some(previous) if has_changed(previous, data) => {
                store.insert(previous.replaced_with(data, now));
                stats.updated += 1;
                ChangeKind::Update
            }
            Some(_) => {
                stats.unchanged += 1;
                ChangeKind::Unchanged
            }
        };

        tracing::debug!(uid = %data.uid, ?kind, "merged record");
        seen.insert(key);
        changes.push(RecordChange {
            kind,
            date: data.date,
            uid: data.uid.clone(),
            summary: data.summary.clone(),
        });
    }

    stats.preserved = existing.keys().filter(|key| !seen.contains(*key)).count();
    stats.total = store.event_count();

    Ok(MergeOutcome {
        store,
        stats,
        changes,
    })
}

/// Collapse records that derive the same event. Two records for one date
/// with different content have no order-independent winner and are
/// rejected.
fn dedupe(derived: Vec<EventData>) -> GreenerNightsResult<Vec<EventData>> {
    let mut first_by_uid: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<EventData> = Vec::with_capacity(derived.len());

    for data in derived {
        match first_by_uid.get(&data.uid) {
            Some(&i) if kept[i] == data => {
                tracing::warn!(date = %data.date, "skipping duplicate record");
            }
            Some(_) => {
                return Err(GreenerNightsError::MalformedInput(format!(
                    "conflicting records for {}",
                    data.date
                )));
            }
            None => {
                first_by_uid.insert(data.uid.clone(), kept.len());
                kept.push(data);
            }
        }
    }

    Ok(kept)
}

//! Change detection between incoming records and persisted events.

mod change_kind;

pub use change_kind::ChangeKind;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event_data::EventData;
use crate::store::PersistedEvent;

/// Whether `new` would change what `existing` shows.
///
/// Only SUMMARY and DESCRIPTION are compared; a missing property compares as
/// an empty string. Category or date drift alone never counts as a change.
pub fn has_changed(existing: &PersistedEvent, new: &EventData) -> bool {
    existing.summary().unwrap_or_default() != new.summary
        || existing.description().unwrap_or_default() != new.description
}

/// The outcome for one incoming record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordChange {
    pub kind: ChangeKind,
    pub date: NaiveDate,
    pub uid: String,
    pub summary: String,
}

impl fmt::Display for RecordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.date, self.summary)
    }
}

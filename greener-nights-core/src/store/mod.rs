//! The persisted calendar and its in-memory working set.

mod event;

pub use event::{EventKey, PersistedEvent};

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use icalendar::{Calendar, CalendarComponent, Property};

use crate::constants::{
    CALENDAR_DESCRIPTION, CALENDAR_NAME, CALSCALE, METHOD, PRODID, VERSION,
};
use crate::error::{GreenerNightsError, GreenerNightsResult};
use crate::ics;

/// A calendar file loaded into memory.
///
/// Events with a UID are indexed by [`EventKey`]; everything else in the
/// file (calendar properties, VTIMEZONE and other components, VEVENTs
/// without a UID) is kept as-is so it survives a save.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarStore {
    properties: Vec<Property>,
    components: Vec<CalendarComponent>,
    events: BTreeMap<EventKey, PersistedEvent>,
}

impl Default for CalendarStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarStore {
    /// An empty store carrying the standard calendar metadata.
    pub fn new() -> Self {
        CalendarStore {
            properties: default_metadata(),
            components: Vec::new(),
            events: BTreeMap::new(),
        }
    }

    /// Load the store at `path`.
    ///
    /// A missing or blank file is an empty store. Content that is not a
    /// calendar is `StoreCorrupt`; any other read failure is `StoreIo`.
    pub fn load(path: &Path) -> GreenerNightsResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no calendar store yet, starting empty");
                return Ok(Self::new());
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(GreenerNightsError::StoreCorrupt {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(source) => {
                return Err(GreenerNightsError::StoreIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let store = Self::parse(&content).map_err(|reason| GreenerNightsError::StoreCorrupt {
            path: path.to_path_buf(),
            reason,
        })?;
        tracing::info!(
            path = %path.display(),
            events = store.event_count(),
            "loaded calendar store"
        );
        Ok(store)
    }

    /// Parse calendar text. Whitespace-only content is an empty store.
    pub fn parse(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        ics::parse_calendar(content).map(Self::from_calendar)
    }

    /// Index a parsed calendar.
    pub fn from_calendar(calendar: Calendar) -> Self {
        let mut components = Vec::new();
        let mut events = BTreeMap::new();

        for component in calendar.components {
            let CalendarComponent::Event(event) = component else {
                components.push(component);
                continue;
            };

            let event = PersistedEvent::from_event(event);
            match event.key() {
                Some(key) if !events.contains_key(&key) => {
                    events.insert(key, event);
                }
                Some(key) => {
                    tracing::warn!(uid = %key.uid, "duplicate event in store, keeping it unindexed");
                    components.push(CalendarComponent::Event(event.into_event()));
                }
                None => {
                    tracing::warn!("event without UID in store, keeping it unindexed");
                    components.push(CalendarComponent::Event(event.into_event()));
                }
            }
        }

        CalendarStore {
            properties: calendar.properties,
            components,
            events,
        }
    }

    pub fn to_calendar(&self) -> Calendar {
        let components = self
            .components
            .iter()
            .cloned()
            .chain(self.events.values().map(|e| CalendarComponent::Event(e.event().clone())))
            .collect();

        Calendar {
            properties: self.properties.clone(),
            components,
        }
    }

    pub fn to_ics(&self) -> String {
        ics::write_calendar(&self.to_calendar())
    }

    /// Write the store to `path` via a temporary file renamed into place.
    pub fn save(&self, path: &Path) -> GreenerNightsResult<()> {
        let io_err = |source| GreenerNightsError::StoreIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let temp = temp_path_for(path);
        std::fs::write(&temp, self.to_ics()).map_err(io_err)?;
        std::fs::rename(&temp, path).map_err(io_err)?;

        tracing::info!(path = %path.display(), events = self.event_count(), "saved calendar store");
        Ok(())
    }

    pub fn get(&self, key: &EventKey) -> Option<&PersistedEvent> {
        self.events.get(key)
    }

    pub fn contains(&self, key: &EventKey) -> bool {
        self.events.contains_key(key)
    }

    /// Insert or replace an event, returning the one it replaced.
    ///
    /// Events without a UID cannot be indexed and are ignored.
    pub fn insert(&mut self, event: PersistedEvent) -> Option<PersistedEvent> {
        let key = event.key()?;
        self.events.insert(key, event)
    }

    /// Indexed events in key order.
    pub fn events(&self) -> impl Iterator<Item = &PersistedEvent> {
        self.events.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EventKey> {
        self.events.keys()
    }

    /// Every VEVENT in the store, indexed or not.
    pub fn event_count(&self) -> usize {
        self.events.len() + self.components.iter().filter(|c| c.as_event().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }

    pub fn metadata(&self) -> &[Property] {
        &self.properties
    }

    /// Replace the calendar-level properties with the standard metadata.
    pub fn reset_metadata(&mut self) {
        self.properties = default_metadata();
    }
}

fn default_metadata() -> Vec<Property> {
    vec![
        Property::new("PRODID", PRODID),
        Property::new("VERSION", VERSION),
        Property::new("CALSCALE", CALSCALE),
        Property::new("METHOD", METHOD),
        Property::new("X-WR-CALNAME", CALENDAR_NAME),
        Property::new("X-WR-CALDESC", CALENDAR_DESCRIPTION),
    ]
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}

//! A VEVENT held in the calendar store.

use chrono::{DateTime, NaiveDateTime, Utc};
use icalendar::{Component, Event, EventLike, Property};

use crate::event_data::EventData;

/// Identity of an event in the store: UID plus RECURRENCE-ID for instance
/// overrides of foreign recurring events.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey {
    pub uid: String,
    pub recurrence_id: Option<String>,
}

impl EventKey {
    pub fn for_uid(uid: &str) -> Self {
        EventKey {
            uid: uid.to_string(),
            recurrence_id: None,
        }
    }
}

/// A calendar event as persisted in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedEvent {
    event: Event,
}

impl PersistedEvent {
    pub fn from_event(event: Event) -> Self {
        PersistedEvent { event }
    }

    /// Build a new all-day event from derived event data.
    ///
    /// DTSTAMP and LAST-MODIFIED are set to `now`. CREATED is copied verbatim
    /// from `preserve_created` when given, otherwise it is `now` as well.
    pub fn from_event_data(
        data: &EventData,
        preserve_created: Option<&Property>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut event = Event::new();
        write_owned(&mut event, data, now);
        match preserve_created {
            Some(created) => event.append_property(created.clone()),
            None => event.created(now),
        };

        PersistedEvent { event }
    }

    /// Build the replacement for this event carrying `data`.
    ///
    /// CREATED is preserved, and foreign properties and sub-components (for
    /// example a user-added VALARM) stay on the replacement.
    pub fn replaced_with(&self, data: &EventData, now: DateTime<Utc>) -> Self {
        let mut event = self.event.clone();
        write_owned(&mut event, data, now);
        if event.property_value("CREATED").is_none() {
            event.created(now);
        }

        PersistedEvent { event }
    }

    /// `None` for a VEVENT without a UID.
    pub fn key(&self) -> Option<EventKey> {
        let uid = self.uid()?.to_string();
        let recurrence_id = self
            .event
            .property_value("RECURRENCE-ID")
            .map(str::to_string);
        Some(EventKey { uid, recurrence_id })
    }

    pub fn uid(&self) -> Option<&str> {
        self.event.get_uid()
    }

    pub fn summary(&self) -> Option<&str> {
        self.event.get_summary()
    }

    pub fn description(&self) -> Option<&str> {
        self.event.get_description()
    }

    pub fn created(&self) -> Option<&Property> {
        self.event.properties().get("CREATED")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("CREATED")
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("LAST-MODIFIED")
    }

    pub fn stamped_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("DTSTAMP")
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn into_event(self) -> Event {
        self.event
    }

    /// Read a DATE-TIME property. Floating and TZID-qualified values are read
    /// as if they were UTC.
    fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        let value = self.event.property_value(name)?.trim_end_matches('Z');
        NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
            .ok()
            .map(|dt| dt.and_utc())
    }
}

/// Overwrite the properties derived from [`EventData`]. Everything else on
/// the event is left alone.
fn write_owned(event: &mut Event, data: &EventData, now: DateTime<Utc>) {
    event
        .uid(&data.uid)
        .all_day(data.date)
        .summary(&data.summary)
        .description(&data.description)
        .timestamp(now)
        .last_modified(now)
        .remove_multi_property("CATEGORIES");
    for category in &data.categories {
        event.add_multi_property("CATEGORIES", category);
    }
}

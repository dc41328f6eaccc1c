//! ICS file parsing and generation.
//!
//! Calendars are held as [`icalendar::Calendar`] values. Parsing decodes
//! TEXT values and generation escapes and folds them again, so properties
//! this crate never interprets survive a load/save cycle.

mod parse;
mod write;

pub use parse::parse_calendar;
pub use write::write_calendar;

//! ICS generation.

use std::fmt;

use icalendar::{Calendar, Property, parser};

/// Serialize a calendar as RFC 5545 text with CRLF line endings.
///
/// Every content line is rendered by [`icalendar::Property`], which escapes
/// TEXT values and folds at 75 octets. Components are written as held, so a
/// component without UID or DTSTAMP stays without them.
pub fn write_calendar(calendar: &Calendar) -> String {
    CalendarText(calendar).to_string()
}

struct CalendarText<'a>(&'a Calendar);

impl fmt::Display for CalendarText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let calendar = parser::Calendar::from(self.0.clone());
        f.write_str("BEGIN:VCALENDAR\r\n")?;
        write_properties(f, &calendar.properties)?;
        for component in &calendar.components {
            write_component(f, component)?;
        }
        f.write_str("END:VCALENDAR\r\n")
    }
}

fn write_component(f: &mut fmt::Formatter<'_>, component: &parser::Component<'_>) -> fmt::Result {
    write!(f, "BEGIN:{}\r\n", component.name)?;
    write_properties(f, &component.properties)?;
    for child in &component.components {
        write_component(f, child)?;
    }
    write!(f, "END:{}\r\n", component.name)
}

fn write_properties(f: &mut fmt::Formatter<'_>, properties: &[parser::Property<'_>]) -> fmt::Result {
    for property in properties {
        let line: String = Property::from(property.clone()).try_into()?;
        f.write_str(&line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::parse_calendar;
    use icalendar::{CalendarComponent, Component, Event, EventLike};

    fn calendar_with(event: Event) -> Calendar {
        Calendar {
            properties: vec![Property::new("VERSION", "2.0")],
            components: vec![CalendarComponent::from(event)],
        }
    }

    #[test]
    fn test_write_calendar_uses_crlf_and_nests_components() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let event = Event::new().uid("abc").all_day(date).done();

        let ics = write_calendar(&calendar_with(event));

        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\n\
             DTEND;VALUE=DATE:20240115\r\nDTSTART;VALUE=DATE:20240115\r\nUID:abc\r\n\
             END:VEVENT\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn test_write_calendar_does_not_stamp_components() {
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:No identity\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let written = write_calendar(&parse_calendar(ics).expect("Should parse"));

        assert_eq!(written, ics);
        assert!(!written.contains("DTSTAMP"));
        assert!(!written.contains("UID"));
    }

    #[test]
    fn test_text_values_are_escaped() {
        let event = Event::new()
            .uid("escaped")
            .summary("Wind; rain, sleet")
            .description("Line one\nLine two \\ end")
            .done();

        let ics = write_calendar(&calendar_with(event));

        assert!(ics.contains("SUMMARY:Wind\\; rain\\, sleet\r\n"), "Got:\n{}", ics);
        assert!(
            ics.contains("DESCRIPTION:Line one\\nLine two \\\\ end\r\n"),
            "Got:\n{}",
            ics
        );
        assert!(!ics.replace("\r\n", "").contains('\n'), "Bare LF in:\n{}", ics);
    }

    #[test]
    fn test_long_lines_are_folded_on_char_boundaries() {
        let text = format!("{}end", "✅ ".repeat(40));
        let event = Event::new().uid("long").summary(&text).done();

        let ics = write_calendar(&calendar_with(event));

        for line in ics.split("\r\n") {
            assert!(line.len() <= 75, "Line too long: {:?}", line);
        }
        let reparsed = parse_calendar(&ics).expect("Should reparse");
        let summary = reparsed.components[0]
            .as_event()
            .and_then(|e| e.get_summary());
        assert_eq!(summary, Some(text.as_str()));
    }

    #[test]
    fn test_param_values_with_separators_are_quoted() {
        let organizer = Property::new("ORGANIZER", "mailto:a@example.com")
            .add_parameter("CN", "Doe, Jane")
            .done();
        let event = Event::new().uid("meeting").append_property(organizer).done();

        let ics = write_calendar(&calendar_with(event));

        assert!(
            ics.contains("ORGANIZER;CN=\"Doe, Jane\":mailto:a@example.com\r\n"),
            "Got:\n{}",
            ics
        );
    }

    #[test]
    fn test_foreign_properties_roundtrip_verbatim() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
X-CUSTOM;X-PARAM=1:keep me\\, please\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/London\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
DTSTART;TZID=Europe/London:20240101T100000\r\n\
LOCATION:Somewhere\\; else\r\n\
UID:foreign@example.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let parsed = parse_calendar(ics).expect("Should parse");
        let written = write_calendar(&parsed);

        assert_eq!(written, ics);
    }
}

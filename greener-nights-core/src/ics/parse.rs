//! ICS parsing using the icalendar crate's parser.

use icalendar::Calendar;
use icalendar::parser::{read_calendar, unfold};

/// Parse a `VCALENDAR` document into an [`icalendar::Calendar`].
///
/// TEXT values come back decoded. A comma-separated CATEGORIES line becomes
/// one CATEGORIES property per item.
pub fn parse_calendar(content: &str) -> Result<Calendar, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if !content.trim_start().starts_with("BEGIN:VCALENDAR") {
        return Err("document does not start with BEGIN:VCALENDAR".to_string());
    }

    let unfolded = split_category_lists(&unfold(content));
    let calendar = read_calendar(&unfolded)?;

    Ok(Calendar::from(calendar))
}

/// Rewrite `CATEGORIES:a,b` as one CATEGORIES line per item.
///
/// The parser decodes a list value into a single string, after which an
/// escaped comma inside an item looks the same as a separator.
fn split_category_lists(unfolded: &str) -> String {
    let mut out = String::with_capacity(unfolded.len());
    for line in unfolded.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);
        let ending = &line[body.len()..];
        let Some(start) = category_value_start(body) else {
            out.push_str(line);
            continue;
        };

        let (head, value) = body.split_at(start);
        for item in split_unescaped_commas(value) {
            out.push_str(head);
            out.push_str(item);
            out.push_str(ending);
        }
    }
    out
}

/// Byte offset of the value on a CATEGORIES content line.
fn category_value_start(line: &str) -> Option<usize> {
    let rest = line.strip_prefix("CATEGORIES")?;
    if !rest.starts_with([':', ';']) {
        return None;
    }

    let mut quoted = false;
    for (i, c) in rest.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ':' if !quoted => return Some(line.len() - rest.len() + i + 1),
            _ => {}
        }
    }
    None
}

fn split_unescaped_commas(value: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            ',' if !escaped => {
                items.push(&value[start..i]);
                start = i + 1;
            }
            _ => escaped = false,
        }
    }
    items.push(&value[start..]);
    items
}

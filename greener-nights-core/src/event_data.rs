//! Event content derived from a record.

use chrono::NaiveDate;

use crate::constants::{CATEGORY_LABEL, UID_DOMAIN, UID_PREFIX};
use crate::error::{GreenerNightsError, GreenerNightsResult};
use crate::record::Record;

/// Everything a calendar event carries for one record. A pure function of
/// the [`Record`]; two values are equivalent when summary and description
/// match.
#[derive(Debug, Clone, PartialEq)]
pub struct EventData {
    pub uid: String,
    pub date: NaiveDate,
    pub summary: String,
    pub description: String,
    pub categories: Vec<String>,
}

impl EventData {
    /// Derive event content from a record. `index` is the record's position
    /// in the feed, used only for error reporting.
    pub fn from_record(record: &Record, index: usize) -> GreenerNightsResult<Self> {
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").map_err(|e| {
            GreenerNightsError::MalformedRecord {
                index,
                reason: format!("invalid date '{}': {}", record.date, e),
            }
        })?;

        let status = if record.was_greener_night {
            "✅ Greener Night"
        } else {
            "❌ Not Greener"
        };
        let summary = format!("{} - Score:  {}", status, record.greenness_score);

        let description = [
            format!("Greenness Score: {}", record.greenness_score),
            format!("Greenness Index: {}", record.greenness_index),
            format!("Was Greener Night: {}", title_case_bool(record.was_greener_night)),
            format!(
                "Is Greener Night (forecast): {}",
                title_case_bool(record.is_greener_night)
            ),
        ]
        .join("\n");

        Ok(EventData {
            uid: uid_for(date),
            date,
            summary,
            description,
            categories: vec![CATEGORY_LABEL.to_string(), record.greenness_index.clone()],
        })
    }
}

/// Deterministic UID for a calendar date.
pub fn uid_for(date: NaiveDate) -> String {
    format!("{}{}@{}", UID_PREFIX, date.format("%Y-%m-%d"), UID_DOMAIN)
}

// Capitalised booleans: `True` / `False`.
fn title_case_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record;

    #[test]
    fn test_uid_is_derived_from_date_only() {
        let a = EventData::from_record(&record("2024-01-15", 7, true), 0).unwrap();
        let b = EventData::from_record(&record("2024-01-15", 3, false), 0).unwrap();
        let c = EventData::from_record(&record("2024-01-16", 7, true), 0).unwrap();

        assert_eq!(a.uid, "greener-night-2024-01-15@greener-nights-history");
        assert_eq!(a.uid, b.uid);
        assert_ne!(a.uid, c.uid);
    }

    #[test]
    fn test_uid_normalizes_unpadded_dates() {
        let padded = EventData::from_record(&record("2024-01-05", 7, true), 0).unwrap();
        let unpadded = EventData::from_record(&record("2024-1-5", 7, true), 0).unwrap();
        assert_eq!(padded.uid, unpadded.uid);
    }

    #[test]
    fn test_summary_and_description_format() {
        let data = EventData::from_record(&record("2024-01-15", 7, true), 0).unwrap();

        assert_eq!(data.summary, "✅ Greener Night - Score:  7");
        assert_eq!(
            data.description,
            "Greenness Score: 7\n\
             Greenness Index: High\n\
             Was Greener Night: True\n\
             Is Greener Night (forecast): True"
        );
        assert_eq!(data.categories, vec!["Greener Nights", "High"]);
        assert_eq!(data.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_not_greener_summary() {
        let data = EventData::from_record(&record("2024-01-15", 2, false), 0).unwrap();
        assert_eq!(data.summary, "❌ Not Greener - Score:  2");
        assert!(data.description.contains("Was Greener Night: False"));
    }

    #[test]
    fn test_unparseable_date_is_malformed_record() {
        let result = EventData::from_record(&record("15/01/2024", 7, true), 4);
        match result {
            Err(GreenerNightsError::MalformedRecord { index, reason }) => {
                assert_eq!(index, 4);
                assert!(reason.contains("15/01/2024"), "Got: {}", reason);
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }
}

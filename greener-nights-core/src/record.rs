//! Greener-night records as supplied by the forecast feed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{GreenerNightsError, GreenerNightsResult};

/// One dated forecast/observation entry from the feed.
///
/// The score is kept as the JSON number it arrived as, so `7` renders as
/// `7` and `7.5` as `7.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub date: String,
    pub greenness_score: Number,
    pub greenness_index: String,
    pub was_greener_night: bool,
    pub is_greener_night: bool,
}

/// `{ "data": { "greenerNightsForecast": [...] } }`
#[derive(Deserialize)]
struct Feed {
    data: FeedData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedData {
    greener_nights_forecast: Vec<Value>,
}

/// Parse the feed document into records.
///
/// A document that is not JSON or lacks the nested key path is a
/// `MalformedInput`; an entry that does not decode as a [`Record`] is a
/// `MalformedRecord` carrying its position in the feed.
pub fn parse_records(content: &str) -> GreenerNightsResult<Vec<Record>> {
    let feed: Feed = serde_json::from_str(content)
        .map_err(|e| GreenerNightsError::MalformedInput(e.to_string()))?;

    feed.data
        .greener_nights_forecast
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| GreenerNightsError::MalformedRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Read and parse the feed file at `path`.
pub fn load_records(path: &Path) -> GreenerNightsResult<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|source| GreenerNightsError::InputIo {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(&content)?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

#[cfg(test)]
pub(crate) fn record(date: &str, score: u64, was_greener: bool) -> Record {
    Record {
        date: date.to_string(),
        greenness_score: Number::from(score),
        greenness_index: "High".to_string(),
        was_greener_night: was_greener,
        is_greener_night: was_greener,
    }
}

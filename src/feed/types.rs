// src/feed/types.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level alert feed payload. A response missing the entry list
/// deserializes as empty rather than erroring.
#[derive(Debug, Default, Deserialize)]
pub struct FeedPayload {
    #[serde(default)]
    pub features: Vec<FeedEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedEntry {
    #[serde(default)]
    pub properties: RawAlert,
}

/// One wire-level alert entry. Every field is optional; validation happens
/// in `filter_warnings`, which drops entries without an id or event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAlert {
    pub id: Option<String>,
    pub event: Option<String>,
    pub area_desc: Option<String>,
    pub effective: Option<String>,
    pub expires: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
}

/// A single active severe-weather warning, validated from the feed.
/// Constructed fresh each cycle; only its `id` outlives the cycle, in the
/// dedup store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub id: String,
    pub category: String,
    pub area_description: String,
    pub effective: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub headline: Option<String>,
    pub description: Option<String>,
}

/// Lenient timestamp parse: malformed input becomes `None`, never an error.
pub fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn payload_without_features_reads_as_empty() {
        let payload: FeedPayload = serde_json::from_str(r#"{"title":"no alerts"}"#).unwrap();
        assert!(payload.features.is_empty());
    }

    #[test]
    fn malformed_timestamps_become_none() {
        assert!(parse_feed_timestamp("not-a-date").is_none());
        assert!(parse_feed_timestamp("").is_none());
        let ts = parse_feed_timestamp("2026-08-27T18:30:00-05:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 8, 27, 23, 30, 0).unwrap());
    }
}

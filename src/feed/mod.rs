// src/feed/mod.rs
pub mod client;
pub mod types;

use metrics::counter;

use crate::feed::types::{parse_feed_timestamp, RawAlert, Warning};

/// Keep only entries whose event exactly equals the target category
/// (case-sensitive), in feed order. Entries without an id or event are
/// dropped silently.
pub fn filter_warnings(raw: Vec<RawAlert>, category: &str) -> Vec<Warning> {
    crate::metrics::ensure_described();

    let mut kept = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;
    for alert in raw {
        let (Some(id), Some(event)) = (alert.id, alert.event) else {
            dropped += 1;
            continue;
        };
        if event != category {
            dropped += 1;
            continue;
        }
        kept.push(Warning {
            id,
            category: event,
            area_description: alert.area_desc.unwrap_or_default(),
            effective: alert.effective.as_deref().and_then(parse_feed_timestamp),
            expires: alert.expires.as_deref().and_then(parse_feed_timestamp),
            headline: alert.headline,
            description: alert.description,
        });
    }

    counter!("herald_warnings_kept_total").increment(kept.len() as u64);
    counter!("herald_entries_dropped_total").increment(dropped as u64);
    kept
}

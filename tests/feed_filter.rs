// tests/feed_filter.rs
use storm_herald::feed::filter_warnings;
use storm_herald::feed::types::RawAlert;

fn entry(id: &str, event: Option<&str>) -> RawAlert {
    RawAlert {
        id: Some(id.to_string()),
        event: event.map(str::to_string),
        ..RawAlert::default()
    }
}

#[test]
fn keeps_exactly_the_target_category_in_feed_order() {
    let raw = vec![
        entry("a", Some("Severe Thunderstorm Warning")),
        entry("b", Some("Tornado Warning")),
        entry("c", Some("Tornado Watch")),
        entry("d", Some("Tornado Warning")),
        entry("e", Some("Flood Advisory")),
    ];

    let kept = filter_warnings(raw, "Tornado Warning");
    let ids: Vec<&str> = kept.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "d"]);
    assert!(kept.iter().all(|w| w.category == "Tornado Warning"));
}

#[test]
fn entries_without_category_metadata_are_excluded_silently() {
    let raw = vec![
        entry("a", None),
        RawAlert::default(),
        entry("b", Some("Tornado Warning")),
    ];
    let kept = filter_warnings(raw, "Tornado Warning");
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "b");
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(filter_warnings(Vec::new(), "Tornado Warning").is_empty());
}

#[test]
fn malformed_timestamps_degrade_to_none() {
    let raw = vec![RawAlert {
        id: Some("a".into()),
        event: Some("Tornado Warning".into()),
        effective: Some("yesterday-ish".into()),
        expires: Some("2026-08-27T23:30:00+00:00".into()),
        ..RawAlert::default()
    }];

    let kept = filter_warnings(raw, "Tornado Warning");
    assert_eq!(kept.len(), 1);
    assert!(kept[0].effective.is_none());
    assert!(kept[0].expires.is_some());
}

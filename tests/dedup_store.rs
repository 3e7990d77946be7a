// tests/dedup_store.rs
use storm_herald::dedup::DedupStore;

#[test]
fn round_trip_reproduces_membership_including_unicode() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("announced.json");
    {
        let mut store = DedupStore::load(&path);
        store.mark_announced("urn:oid:2.49.0.1.840.0.1");
        store.mark_announced("výstraha-šťastná");
        store.mark_announced("竜巻警報-001");
    }

    let reloaded = DedupStore::load(&path);
    assert_eq!(reloaded.len(), 3);
    assert!(reloaded.has_been_announced("urn:oid:2.49.0.1.840.0.1"));
    assert!(reloaded.has_been_announced("výstraha-šťastná"));
    assert!(reloaded.has_been_announced("竜巻警報-001"));
    assert!(!reloaded.has_been_announced("urn:oid:other"));
}

#[test]
fn second_mark_does_not_duplicate_the_persisted_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("announced.json");
    let mut store = DedupStore::load(&path);
    store.mark_announced("urn:alert:1");
    store.mark_announced("urn:alert:1");
    assert_eq!(store.len(), 1);

    let raw = std::fs::read_to_string(&path).unwrap();
    let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec!["urn:alert:1".to_string()]);
}

#[test]
fn corrupt_state_starts_empty_without_failing() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("announced.json");
    std::fs::write(&path, "{not json at all").unwrap();

    let store = DedupStore::load(&path);
    assert!(store.is_empty());
}

#[test]
fn valid_json_of_the_wrong_shape_starts_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("announced.json");
    std::fs::write(&path, r#"{"ids": ["urn:alert:1"]}"#).unwrap();
    assert!(DedupStore::load(&path).is_empty());

    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(DedupStore::load(&path).is_empty());
}

#[test]
fn missing_state_behaves_like_an_empty_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("never-written.json");

    let mut store = DedupStore::load(&path);
    assert!(store.is_empty());
    assert!(!store.has_been_announced("urn:alert:1"));

    // And the first mark creates the file.
    store.mark_announced("urn:alert:1");
    assert!(path.exists());
}

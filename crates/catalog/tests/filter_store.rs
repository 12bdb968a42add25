use pretty_assertions::assert_eq;
use review_catalog::{FilterStore, QualityFilter};
use review_schema::CompletionQuality;

#[test]
fn missing_file_loads_empty_filter() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilterStore::new(dir.path());
    assert!(store.load().is_empty());
}

#[test]
fn saved_filter_round_trips_as_level_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilterStore::new(&dir.path().join("nested"));

    let mut filter = QualityFilter::default();
    filter.toggle(CompletionQuality::Low);
    filter.toggle(CompletionQuality::High);
    store.save(&filter).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw, r#"["high","low"]"#);
    assert!(store
        .path()
        .ends_with("nested/product-completion-filter.json"));
    assert_eq!(store.load(), filter);
}

#[test]
fn corrupt_file_falls_back_to_empty_filter() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilterStore::new(dir.path());

    std::fs::write(store.path(), "{not json").unwrap();
    assert!(store.load().is_empty());

    std::fs::write(store.path(), r#"["high","excellent"]"#).unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn clearing_persists_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilterStore::new(dir.path());
    store
        .save(&QualityFilter::new([CompletionQuality::Medium]))
        .unwrap();
    store.save(&QualityFilter::default()).unwrap();

    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    assert!(store.load().is_empty());
}

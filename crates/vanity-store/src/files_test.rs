use vanity_core::{
    add_history, AccountStats, Platform, VanityPlateSum, VanityPlateSumCollection,
};

use super::*;

fn sample_snapshot(id: &str) -> ProfileStatsSnapshot {
    let mut snapshot = ProfileStatsSnapshot::new(id, "Sample");
    snapshot.time_retrieved = 1_700_000_000_000;
    let mut stats = AccountStats::unretrieved(Platform::Twitch, id);
    stats.base.follower_count = 42;
    stats.base.time_retrieved = 1_700_000_000_000;
    snapshot.push(stats);
    snapshot
}

#[test]
fn missing_documents_load_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert!(store.load_snapshot("nobody").unwrap().is_none());
    assert!(store.load_history("nobody").unwrap().is_none());
    assert!(store.load_summary().unwrap().is_none());
}

#[test]
fn snapshot_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let snapshot = sample_snapshot("band");

    store.save_snapshot(&snapshot).unwrap();
    assert!(dir.path().join("band-stats.json").is_file());
    assert_eq!(store.load_snapshot("band").unwrap(), Some(snapshot));
}

#[test]
fn documents_use_four_space_indent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.save_snapshot(&sample_snapshot("band")).unwrap();

    let text = std::fs::read_to_string(store.snapshot_path("band")).unwrap();
    assert!(text.starts_with("{\n    \"id\": \"band\""), "got: {text}");
}

#[test]
fn history_and_summary_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let history = add_history(&sample_snapshot("band"), None, 5);
    store.save_history("band", &history).unwrap();
    assert_eq!(store.load_history("band").unwrap(), Some(history));

    let mut summary = VanityPlateSumCollection::new(5);
    summary.sums.push(VanityPlateSum {
        username: "band".to_string(),
        display_name: "Sample".to_string(),
        total_followers: 42,
    });
    store.save_summary(&summary).unwrap();
    assert!(dir.path().join("db_summary.json").is_file());
    assert_eq!(store.load_summary().unwrap(), Some(summary));
}

#[test]
fn save_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested").join("out"));
    store.save_snapshot(&sample_snapshot("band")).unwrap();
    assert!(store.snapshot_path("band").is_file());
}

#[test]
fn save_overwrites_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.save_snapshot(&sample_snapshot("band")).unwrap();
    let mut renamed = sample_snapshot("band");
    renamed.display_name = "Renamed".to_string();
    store.save_snapshot(&renamed).unwrap();

    let loaded = store.load_snapshot("band").unwrap().unwrap();
    assert_eq!(loaded.display_name, "Renamed");
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn corrupt_history_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.history_path("band"), "{ not json").unwrap();
    let result = store.load_history("band");
    assert!(
        matches!(result, Err(StoreError::Parse { .. })),
        "expected Parse, got: {result:?}"
    );
}

#[test]
fn corrupt_snapshot_envelope_is_a_snapshot_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.snapshot_path("band"), "[1, 2]").unwrap();
    let result = store.load_snapshot("band");
    assert!(
        matches!(result, Err(StoreError::Snapshot { .. })),
        "expected Snapshot, got: {result:?}"
    );
}

#[test]
fn error_chain_names_each_cause_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.snapshot_path("band"), "{ truncated").unwrap();
    let err = store.load_snapshot("band").unwrap_err();

    let mut chain = vec![err.to_string()];
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }

    assert_eq!(
        chain[0],
        format!("unreadable snapshot {}", store.snapshot_path("band").display())
    );
    assert_eq!(chain[1], "invalid JSON");
    assert_eq!(chain.len(), 3, "got: {chain:?}");
}

#[test]
fn clear_history_removes_only_history_documents() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let history = add_history(&sample_snapshot("a"), None, 1);
    store.save_history("a", &history).unwrap();
    store.save_history("b", &history).unwrap();
    store.save_snapshot(&sample_snapshot("a")).unwrap();

    assert_eq!(store.clear_history().unwrap(), 2);
    assert!(store.load_history("a").unwrap().is_none());
    assert!(store.load_snapshot("a").unwrap().is_some());
    assert_eq!(store.clear_history().unwrap(), 0);
}

#[test]
fn clear_history_on_missing_dir_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent"));
    assert_eq!(store.clear_history().unwrap(), 0);
}

#[test]
fn list_snapshot_ids_is_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    for id in ["zed", "alpha", "mid"] {
        store.save_snapshot(&sample_snapshot(id)).unwrap();
    }
    store
        .save_history("alpha", &add_history(&sample_snapshot("alpha"), None, 1))
        .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

    assert_eq!(
        list_snapshot_ids(dir.path()).unwrap(),
        vec!["alpha".to_string(), "mid".to_string(), "zed".to_string()]
    );
}

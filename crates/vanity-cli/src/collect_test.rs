use std::collections::HashMap;

use vanity_core::{AccountStats, MetricKind, Platform, VanityPlateSumCollection};

use super::*;

fn roster() -> ProfilesFile {
    ProfilesFile {
        profiles: vec![
            ProfileConfig {
                id: "smosh".to_string(),
                display_name: "Smosh".to_string(),
                twitch: vec!["smoshgames".to_string()],
                ..ProfileConfig::default()
            },
            ProfileConfig {
                id: "tomfulp".to_string(),
                display_name: "Tom Fulp".to_string(),
                newgrounds: vec!["tomfulp".to_string()],
                ..ProfileConfig::default()
            },
        ],
    }
}

fn twitch(followers: i64, time: i64) -> AccountStats {
    let mut stats = AccountStats::unretrieved(Platform::Twitch, "smoshgames");
    stats.base.follower_count = followers;
    stats.base.time_retrieved = time;
    stats
}

fn fresh(record: AccountStats, time: i64) -> ProfileStatsSnapshot {
    let mut snapshot = ProfileStatsSnapshot::new("smosh", "Smosh");
    snapshot.time_retrieved = time;
    snapshot.push(record);
    snapshot
}

fn config_for(dir: &std::path::Path) -> AppConfig {
    let vars: HashMap<&str, String> =
        HashMap::from([("VANITY_OUTPUT_DIR", dir.display().to_string())]);
    vanity_core::build_app_config(|key| {
        vars.get(key)
            .cloned()
            .ok_or(std::env::VarError::NotPresent)
    })
    .unwrap()
}

#[test]
fn select_profiles_without_filter_returns_roster_order() {
    let roster = roster();
    let ids: Vec<&str> = select_profiles(&roster, None)
        .unwrap()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["smosh", "tomfulp"]);
}

#[test]
fn select_profiles_unknown_id_is_an_error() {
    let err = select_profiles(&roster(), Some("nobody")).unwrap_err();
    assert!(err.to_string().contains("nobody"), "got: {err}");
}

#[test]
fn reconcile_profile_persists_snapshot_history_and_sum() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let roster = roster();
    let profile = roster.find("smosh").unwrap();

    let sum = reconcile_profile(&store, profile, fresh(twitch(500, 10), 10), 10).unwrap();
    assert_eq!(sum.total_followers, 500);
    assert_eq!(sum.username, "smosh");

    let history = store.load_history("smosh").unwrap().unwrap();
    let index = history
        .index(Platform::Twitch, "smoshgames", MetricKind::Followers)
        .unwrap();
    assert_eq!(index.historical_counts.len(), 1);
    assert!(store.load_snapshot("smosh").unwrap().is_some());
}

#[test]
fn reconcile_profile_falls_back_to_stored_reading_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let roster = roster();
    let profile = roster.find("smosh").unwrap();

    reconcile_profile(&store, profile, fresh(twitch(500, 10), 10), 10).unwrap();
    let failed = AccountStats::unretrieved(Platform::Twitch, "smoshgames");
    let sum = reconcile_profile(&store, profile, fresh(failed, 20), 20).unwrap();

    assert_eq!(sum.total_followers, 500);
    let stored = store.load_snapshot("smosh").unwrap().unwrap();
    assert_eq!(stored.twitch_stats[0].base.time_retrieved, 10);
    assert_eq!(stored.time_retrieved, 20);
}

#[test]
fn reconcile_profile_replaces_corrupt_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.snapshot_path("smosh"), "{ truncated").unwrap();
    let roster = roster();
    let profile = roster.find("smosh").unwrap();

    let sum = reconcile_profile(&store, profile, fresh(twitch(500, 10), 10), 10).unwrap();
    assert_eq!(sum.total_followers, 500);

    let stored = store.load_snapshot("smosh").unwrap().unwrap();
    assert_eq!(stored.twitch_stats[0].base.follower_count, 500);
    let history = store.load_history("smosh").unwrap().unwrap();
    assert_eq!(history.entry_count(), 1);

    let sum = reconcile_profile(&store, profile, fresh(twitch(600, 20), 20), 20).unwrap();
    assert_eq!(sum.total_followers, 600);
}

#[test]
fn reconcile_profile_replaces_corrupt_history_with_matching_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.history_path("smosh"), "{ nope").unwrap();
    let roster = roster();
    let profile = roster.find("smosh").unwrap();

    reconcile_profile(&store, profile, fresh(twitch(500, 10), 10), 10).unwrap();

    let stored = store.load_snapshot("smosh").unwrap().unwrap();
    assert_eq!(stored.time_retrieved, 10);
    let history = store.load_history("smosh").unwrap().unwrap();
    let index = history
        .index(Platform::Twitch, "smoshgames", MetricKind::Followers)
        .unwrap();
    assert_eq!(index.historical_counts.len(), 1);
    assert_eq!(index.historical_counts[0].count, 500);
}

fn stored_summary(store: &FileStore, ids: &[&str]) {
    let mut summary = VanityPlateSumCollection::new(1);
    for id in ids {
        summary.upsert(VanityPlateSum {
            username: (*id).to_string(),
            display_name: (*id).to_string(),
            total_followers: 99,
        });
    }
    store.save_summary(&summary).unwrap();
}

fn summary_ids(store: &FileStore) -> Vec<String> {
    store
        .load_summary()
        .unwrap()
        .unwrap()
        .sums
        .into_iter()
        .map(|s| s.username)
        .collect()
}

fn accountless_roster() -> ProfilesFile {
    ProfilesFile {
        profiles: vec![ProfileConfig {
            id: "empty".to_string(),
            display_name: "Empty".to_string(),
            ..ProfileConfig::default()
        }],
    }
}

#[tokio::test]
async fn full_collect_rebuilds_summary_from_scratch() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let store = FileStore::new(dir.path());
    stored_summary(&store, &["removed", "empty"]);

    run_collect(&config, &accountless_roster(), None, false)
        .await
        .unwrap();

    assert_eq!(summary_ids(&store), vec!["empty".to_string()]);
    let summary = store.load_summary().unwrap().unwrap();
    assert_eq!(summary.sums[0].total_followers, 0);
    assert!(summary.time_retrieved > 1);
}

#[tokio::test]
async fn filtered_collect_keeps_other_profiles_in_summary() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let store = FileStore::new(dir.path());
    stored_summary(&store, &["other"]);

    run_collect(&config, &accountless_roster(), Some("empty"), false)
        .await
        .unwrap();

    assert_eq!(
        summary_ids(&store),
        vec!["other".to_string(), "empty".to_string()]
    );
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    run_collect(&config, &roster(), None, true).await.unwrap();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn collect_with_unknown_profile_fails_before_scraping() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    assert!(run_collect(&config, &roster(), Some("ghost"), false)
        .await
        .is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

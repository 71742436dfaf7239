//! `collect` command: scrape, reconcile, persist.
//!
//! Profiles are processed one at a time. Unreadable stored documents are
//! replaced; a profile whose documents cannot be written is logged and
//! skipped. A full run rebuilds the summary collection from this run's
//! sums; `--profile` updates one entry of the stored collection.

use anyhow::Context as _;
use vanity_core::{
    add_history, merge_snapshots_with_report, now_millis, summarize, AppConfig, ProfileConfig,
    ProfileStatsSnapshot, ProfilesFile, VanityPlateSum, VanityPlateSumCollection,
};
use vanity_scraper::{RetryPolicy, ScrapeClient};
use vanity_store::{FileStore, StatsStore, StoreError};

/// Resolves the `--profile` filter against the roster.
pub(crate) fn select_profiles<'a>(
    roster: &'a ProfilesFile,
    profile_filter: Option<&str>,
) -> anyhow::Result<Vec<&'a ProfileConfig>> {
    match profile_filter {
        Some(id) => {
            let profile = roster
                .find(id)
                .ok_or_else(|| anyhow::anyhow!("profile '{id}' not found in roster"))?;
            Ok(vec![profile])
        }
        None => Ok(roster.profiles.iter().collect()),
    }
}

/// # Errors
///
/// Returns an error if the profile filter matches nothing, the scrape
/// client cannot be built, the summary cannot be written, or every
/// selected profile failed.
pub(crate) async fn run_collect(
    config: &AppConfig,
    roster: &ProfilesFile,
    profile_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let profiles = select_profiles(roster, profile_filter)?;

    if dry_run {
        for profile in &profiles {
            let accounts = profile.accounts();
            println!(
                "dry-run: {} ({}) - {} accounts",
                profile.id,
                profile.display_name,
                accounts.len()
            );
            for (platform, handle) in accounts {
                println!("  {platform}: {handle}");
            }
        }
        return Ok(());
    }

    let client = ScrapeClient::from_config(config).context("failed to build scrape client")?;
    let store = FileStore::new(&config.output_dir);

    let mut summary = if profile_filter.is_some() {
        load_or_discard(store.load_summary(), "summary")
            .unwrap_or_else(|| VanityPlateSumCollection::new(0))
    } else {
        VanityPlateSumCollection::new(0)
    };

    let mut failed = 0usize;
    for profile in &profiles {
        let fresh = scrape_profile(&client, config, profile).await;
        match reconcile_profile(&store, profile, fresh, now_millis()) {
            Ok(sum) => {
                tracing::info!(
                    profile = %profile.id,
                    total_followers = sum.total_followers,
                    "profile collected"
                );
                summary.upsert(sum);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(profile = %profile.id, error = %format!("{e:#}"), "profile failed");
            }
        }
    }

    summary.time_retrieved = now_millis();
    store
        .save_summary(&summary)
        .context("failed to write summary")?;

    if !profiles.is_empty() && failed == profiles.len() {
        anyhow::bail!("all {failed} profiles failed");
    }
    println!(
        "collected {} of {} profiles",
        profiles.len() - failed,
        profiles.len()
    );
    Ok(())
}

/// Scrapes every account of `profile` into a fresh snapshot. Never fails:
/// unreachable accounts come back as sentinel records.
async fn scrape_profile(
    client: &ScrapeClient,
    config: &AppConfig,
    profile: &ProfileConfig,
) -> ProfileStatsSnapshot {
    let mut snapshot = ProfileStatsSnapshot::new(&profile.id, &profile.display_name);
    for (platform, handle) in profile.accounts() {
        let policy = RetryPolicy::for_platform(platform, config);
        let stats = client
            .scrape_account(platform, handle, &policy, config.fetch_icons)
            .await;
        snapshot.push(stats);
    }
    snapshot.time_retrieved = now_millis();
    snapshot
}

/// Treats an unreadable stored document as absent so the next write
/// replaces it.
fn load_or_discard<T>(loaded: Result<Option<T>, StoreError>, document: &str) -> Option<T> {
    loaded.unwrap_or_else(|e| {
        let e = anyhow::Error::new(e);
        tracing::warn!(document, error = %format!("{e:#}"), "stored document unreadable, starting fresh");
        None
    })
}

/// Merges `fresh` with the stored snapshot, appends history, saves both,
/// and returns the profile's follower sum.
///
/// Both stored documents are read before either is written. An unreadable
/// snapshot or history is replaced rather than failing the profile.
///
/// # Errors
///
/// Returns an error if a document cannot be written.
pub(crate) fn reconcile_profile(
    store: &impl StatsStore,
    profile: &ProfileConfig,
    fresh: ProfileStatsSnapshot,
    now: i64,
) -> anyhow::Result<VanityPlateSum> {
    let old = load_or_discard(store.load_snapshot(&profile.id), "snapshot");
    let prior = load_or_discard(store.load_history(&profile.id), "history");

    let (merged, report) = merge_snapshots_with_report(old.as_ref(), fresh);
    tracing::debug!(
        profile = %profile.id,
        accepted = report.accepted,
        icon_carried = report.icon_carried,
        fell_back = report.fell_back,
        no_valid_previous = report.no_valid_previous,
        "snapshot merged"
    );
    let history = add_history(&merged, prior, now);

    store
        .save_snapshot(&merged)
        .context("failed to save snapshot")?;
    store
        .save_history(&profile.id, &history)
        .context("failed to save history")?;

    Ok(summarize(&profile.id, &profile.display_name, &merged))
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;

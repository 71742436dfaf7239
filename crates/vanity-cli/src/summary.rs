//! `summary` command.

use anyhow::Context as _;
use chrono::DateTime;
use vanity_core::{AppConfig, VanityPlateSumCollection};
use vanity_store::{FileStore, StatsStore};

/// Renders the leaderboard, one line per profile, largest total first.
pub(crate) fn format_leaderboard(summary: &VanityPlateSumCollection) -> String {
    let when = DateTime::from_timestamp_millis(summary.time_retrieved).map_or_else(
        || "unknown time".to_string(),
        |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    let mut out = format!("follower totals as of {when}\n");
    for (rank, sum) in summary.leaderboard().into_iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} ({}): {}\n",
            rank + 1,
            sum.display_name,
            sum.username,
            sum.total_followers
        ));
    }
    out
}

/// # Errors
///
/// Returns an error if the stored summary exists but cannot be read.
pub(crate) fn run_summary(config: &AppConfig) -> anyhow::Result<()> {
    let store = FileStore::new(&config.output_dir);
    match store.load_summary().context("failed to load summary")? {
        Some(summary) => print!("{}", format_leaderboard(&summary)),
        None => println!(
            "no summary in {}; run `vanity-cli collect` first",
            config.output_dir.display()
        ),
    }
    Ok(())
}

//! `history` commands.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use vanity_core::{add_history, AppConfig, HistoryLog, ProfilesFile};
use vanity_store::{list_snapshot_ids, FileStore, StatsStore};

/// Sub-directories of `root` whose names are plain integers, in ascending
/// numeric order. The number is the epoch-millisecond time the folder's
/// snapshots were taken.
pub(crate) fn numbered_folders(root: &Path) -> anyhow::Result<Vec<(i64, PathBuf)>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("failed to read {}", root.display()))?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", root.display()))?;
        if !entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        let name = entry.file_name();
        match name.to_str().and_then(|n| n.parse::<i64>().ok()) {
            Some(stamp) => folders.push((stamp, entry.path())),
            None => tracing::debug!(folder = ?name, "skipping non-numeric folder"),
        }
    }
    folders.sort_by_key(|(stamp, _)| *stamp);
    Ok(folders)
}

/// Folds every archived snapshot under `from` into fresh history logs, one
/// per roster profile, oldest folder first.
///
/// # Errors
///
/// Returns an error if the archive cannot be listed or a snapshot cannot be
/// read.
pub(crate) fn rebuild_history(
    roster: &ProfilesFile,
    from: &Path,
) -> anyhow::Result<BTreeMap<String, HistoryLog>> {
    let mut rebuilt: BTreeMap<String, HistoryLog> = BTreeMap::new();

    for (stamp, folder) in numbered_folders(from)? {
        let archive = FileStore::new(&folder);
        for id in list_snapshot_ids(&folder)? {
            if roster.find(&id).is_none() {
                tracing::warn!(profile = %id, folder = %folder.display(), "snapshot not in roster, skipping");
                continue;
            }
            let Some(snapshot) = archive
                .load_snapshot(&id)
                .with_context(|| format!("failed to load {id} from {}", folder.display()))?
            else {
                continue;
            };
            let prior = rebuilt.remove(&id);
            rebuilt.insert(id, add_history(&snapshot, prior, stamp));
        }
    }
    Ok(rebuilt)
}

/// # Errors
///
/// See [`rebuild_history`]; also fails if a rebuilt history cannot be
/// written.
pub(crate) fn run_history_rebuild(
    config: &AppConfig,
    roster: &ProfilesFile,
    from: &Path,
) -> anyhow::Result<()> {
    let rebuilt = rebuild_history(roster, from)?;
    let store = FileStore::new(&config.output_dir);
    for (id, history) in &rebuilt {
        store
            .save_history(id, history)
            .with_context(|| format!("failed to save history for {id}"))?;
        tracing::info!(profile = %id, entries = history.entry_count(), "history rebuilt");
    }
    println!("rebuilt history for {} profiles", rebuilt.len());
    Ok(())
}

/// # Errors
///
/// Returns an error if a history document cannot be removed.
pub(crate) fn run_history_clear(config: &AppConfig) -> anyhow::Result<()> {
    let removed = FileStore::new(&config.output_dir)
        .clear_history()
        .context("failed to clear history")?;
    println!("removed {removed} history documents");
    Ok(())
}

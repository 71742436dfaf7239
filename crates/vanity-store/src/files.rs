use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use vanity_core::{parse_snapshot, HistoryLog, ProfileStatsSnapshot, VanityPlateSumCollection};

use crate::{StatsStore, StoreError};

const SNAPSHOT_SUFFIX: &str = "-stats.json";
const HISTORY_SUFFIX: &str = "-history.json";
const SUMMARY_FILE: &str = "db_summary.json";

/// JSON documents in one directory:
/// `<id>-stats.json`, `<id>-history.json` and `db_summary.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn snapshot_path(&self, profile_id: &str) -> PathBuf {
        self.dir.join(format!("{profile_id}{SNAPSHOT_SUFFIX}"))
    }

    #[must_use]
    pub fn history_path(&self, profile_id: &str) -> PathBuf {
        self.dir.join(format!("{profile_id}{HISTORY_SUFFIX}"))
    }

    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(SUMMARY_FILE)
    }

    /// Deletes every history document in the directory. Returns how many
    /// were removed; a missing directory removes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be listed or a file
    /// cannot be removed.
    pub fn clear_history(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for path in files_with_suffix(&self.dir, HISTORY_SUFFIX)? {
            std::fs::remove_file(&path).map_err(|e| StoreError::Write {
                path: path.display().to_string(),
                source: e,
            })?;
            tracing::debug!(path = %path.display(), "removed history document");
            removed += 1;
        }
        Ok(removed)
    }
}

impl StatsStore for FileStore {
    fn load_snapshot(&self, profile_id: &str) -> Result<Option<ProfileStatsSnapshot>, StoreError> {
        let path = self.snapshot_path(profile_id);
        let Some(text) = read_optional(&path)? else {
            return Ok(None);
        };
        parse_snapshot(&text)
            .map(Some)
            .map_err(|e| StoreError::Snapshot {
                path: path.display().to_string(),
                source: e,
            })
    }

    fn save_snapshot(&self, snapshot: &ProfileStatsSnapshot) -> Result<(), StoreError> {
        write_document(&self.snapshot_path(&snapshot.id), snapshot)
    }

    fn load_history(&self, profile_id: &str) -> Result<Option<HistoryLog>, StoreError> {
        read_document(&self.history_path(profile_id))
    }

    fn save_history(&self, profile_id: &str, history: &HistoryLog) -> Result<(), StoreError> {
        write_document(&self.history_path(profile_id), history)
    }

    fn load_summary(&self) -> Result<Option<VanityPlateSumCollection>, StoreError> {
        read_document(&self.summary_path())
    }

    fn save_summary(&self, summary: &VanityPlateSumCollection) -> Result<(), StoreError> {
        write_document(&self.summary_path(), summary)
    }
}

/// Profile ids of every snapshot document in `dir`, sorted.
///
/// # Errors
///
/// Returns [`StoreError`] if the directory cannot be listed.
pub fn list_snapshot_ids(dir: &Path) -> Result<Vec<String>, StoreError> {
    let mut ids: Vec<String> = files_with_suffix(dir, SNAPSHOT_SUFFIX)?
        .iter()
        .filter_map(|p| p.file_name()?.to_str()?.strip_suffix(SNAPSHOT_SUFFIX))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    ids.sort();
    Ok(ids)
}

fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, StoreError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StoreError::Read {
                path: dir.display().to_string(),
                source: e,
            })
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::Read {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Read {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| StoreError::Parse {
            path: path.display().to_string(),
            source: e,
        })
}

/// Serializes with four-space indentation.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Writes to a temp file in the target directory, then renames over the
/// target, so readers only ever see a complete document.
fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let body = to_pretty_json(value)?;
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&body).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = body.len(), "wrote document");
    Ok(())
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;

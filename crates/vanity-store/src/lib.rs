//! Persistence for snapshots, history logs and summary collections.
//!
//! The reconciliation core only needs get/put access keyed by profile id;
//! [`StatsStore`] is that contract and [`FileStore`] the JSON document
//! implementation.

use thiserror::Error;
use vanity_core::{DocumentError, HistoryLog, ProfileStatsSnapshot, VanityPlateSumCollection};

pub mod files;

pub use files::{list_snapshot_ids, FileStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unreadable snapshot {path}")]
    Snapshot {
        path: String,
        #[source]
        source: DocumentError,
    },

    #[error("unreadable document {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize document")]
    Serialize(#[from] serde_json::Error),
}

/// Get/put access to the persisted documents of each profile.
///
/// A document that does not exist yet loads as `Ok(None)`.
pub trait StatsStore {
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document exists but cannot be read or parsed.
    fn load_snapshot(&self, profile_id: &str) -> Result<Option<ProfileStatsSnapshot>, StoreError>;

    /// Overwrites the profile's snapshot, keyed by `snapshot.id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    fn save_snapshot(&self, snapshot: &ProfileStatsSnapshot) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the document exists but cannot be read or parsed.
    fn load_history(&self, profile_id: &str) -> Result<Option<HistoryLog>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    fn save_history(&self, profile_id: &str, history: &HistoryLog) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the document exists but cannot be read or parsed.
    fn load_summary(&self) -> Result<Option<VanityPlateSumCollection>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    fn save_summary(&self, summary: &VanityPlateSumCollection) -> Result<(), StoreError>;
}

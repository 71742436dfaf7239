//! Data model and reconciliation rules for vanity metrics.
//!
//! Nothing in this crate performs I/O except [`load_app_config`] and
//! [`load_profiles`]; the merge, history and summation functions are pure
//! and infallible.

pub mod app_config;
pub mod config;
pub mod document;
pub mod history;
pub mod merge;
pub mod platform;
pub mod profiles;
pub mod reconcile;
pub mod stats;
pub mod summary;
pub mod validity;

pub use app_config::{AppConfig, Environment};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use document::{parse_record, parse_snapshot, DocumentError, RecordError};
pub use history::{add_history, HistoryEntry, HistoryIndex, HistoryLog, MetricKind};
pub use merge::{merge_account, merge_account_with_decision, MergeDecision};
pub use platform::Platform;
pub use profiles::{load_profiles, ProfileConfig, ProfilesFile};
pub use reconcile::{merge_snapshots, merge_snapshots_with_report, MergeReport};
pub use stats::{
    AccountKey, AccountStats, InstagramDetail, NewgroundsDetail, PlatformDetail,
    ProfileStatsSnapshot, SoundCloudDetail, SpotifyDetail, StatsBase, TiktokDetail,
    TwitterDetail, YoutubeDetail, UNKNOWN,
};
pub use summary::{summarize, VanityPlateSum, VanityPlateSumCollection};
pub use validity::{is_valid, validate, ValidityIssue};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profiles file at {path}")]
    ProfilesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profiles file")]
    ProfilesFileParse(#[from] serde_yaml::Error),

    #[error("profile validation failed: {0}")]
    Validation(String),
}

/// Milliseconds since the Unix epoch, the timestamp unit of every document.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

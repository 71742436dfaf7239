//! Append-only per-account metric history.
//!
//! Each [`HistoryIndex`] is one time series keyed by platform, username and
//! [`MetricKind`]. Appends are deduplicated against the latest entry so the
//! series only grows when the value actually changes.

use serde::{Deserialize, Deserializer, Serialize};

use crate::platform::Platform;
use crate::stats::{AccountStats, ProfileStatsSnapshot};

/// What a history series counts.
///
/// Serialized by name. Older documents stored the numeric codes `0`, `1`
/// and `2`, which are still accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetricKind {
    Followers,
    Views,
    Likes,
}

impl MetricKind {
    #[must_use]
    pub fn from_code(code: u64) -> Option<MetricKind> {
        match code {
            0 => Some(MetricKind::Followers),
            1 => Some(MetricKind::Views),
            2 => Some(MetricKind::Likes),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Followers => write!(f, "followers"),
            MetricKind::Views => write!(f, "views"),
            MetricKind::Likes => write!(f, "likes"),
        }
    }
}

impl<'de> Deserialize<'de> for MetricKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(u64),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => MetricKind::from_code(code).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown metric code {code}"))
            }),
            Repr::Name(name) => match name.as_str() {
                "Followers" => Ok(MetricKind::Followers),
                "Views" => Ok(MetricKind::Views),
                "Likes" => Ok(MetricKind::Likes),
                other => Err(serde::de::Error::custom(format!(
                    "unknown metric kind '{other}'"
                ))),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub count: i64,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryIndex {
    pub platform_name: Platform,
    pub username: String,
    pub count_units: MetricKind,
    #[serde(default)]
    pub historical_counts: Vec<HistoryEntry>,
}

impl HistoryIndex {
    #[must_use]
    pub fn new(platform: Platform, username: &str, kind: MetricKind) -> Self {
        Self {
            platform_name: platform,
            username: username.to_string(),
            count_units: kind,
            historical_counts: Vec::new(),
        }
    }

    fn matches(&self, platform: Platform, username: &str, kind: MetricKind) -> bool {
        self.platform_name == platform && self.username == username && self.count_units == kind
    }

    /// Most recent entry by timestamp.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.historical_counts.iter().max_by_key(|e| e.timestamp)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    #[serde(default)]
    pub histories: Vec<HistoryIndex>,
}

impl HistoryLog {
    #[must_use]
    pub fn index(&self, platform: Platform, username: &str, kind: MetricKind) -> Option<&HistoryIndex> {
        self.histories
            .iter()
            .find(|h| h.matches(platform, username, kind))
    }

    fn index_mut(&mut self, platform: Platform, username: &str, kind: MetricKind) -> &mut HistoryIndex {
        let pos = match self
            .histories
            .iter()
            .position(|h| h.matches(platform, username, kind))
        {
            Some(pos) => pos,
            None => {
                self.histories
                    .push(HistoryIndex::new(platform, username, kind));
                self.histories.len() - 1
            }
        };
        &mut self.histories[pos]
    }

    /// Total number of entries across every series.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.histories.iter().map(|h| h.historical_counts.len()).sum()
    }
}

/// Result of offering one reading to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// Same count as the latest entry.
    Unchanged,
    /// Older than the latest entry; the series stays sorted by timestamp.
    Stale,
}

/// Offers `candidate` to `entries`.
///
/// Entries are stable-sorted by timestamp first; the candidate is pushed
/// only when it is not older than the latest entry and its count differs
/// from the latest entry's count.
pub fn append_entry(entries: &mut Vec<HistoryEntry>, candidate: HistoryEntry) -> AppendOutcome {
    entries.sort_by_key(|e| e.timestamp);
    match entries.last() {
        Some(last) if candidate.timestamp < last.timestamp => AppendOutcome::Stale,
        Some(last) if last.count == candidate.count => AppendOutcome::Unchanged,
        _ => {
            entries.push(candidate);
            AppendOutcome::Appended
        }
    }
}

fn record_metric(log: &mut HistoryLog, account: &AccountStats, kind: MetricKind, now: i64) {
    let Some(count) = account.metric(kind) else {
        return;
    };
    let platform = account.platform();
    let index = log.index_mut(platform, account.username(), kind);
    let outcome = append_entry(
        &mut index.historical_counts,
        HistoryEntry {
            count,
            timestamp: now,
        },
    );
    match outcome {
        AppendOutcome::Appended => {}
        AppendOutcome::Unchanged => tracing::debug!(
            platform = %platform,
            username = account.username(),
            metric = %kind,
            count,
            "history unchanged, not appending"
        ),
        AppendOutcome::Stale => tracing::debug!(
            platform = %platform,
            username = account.username(),
            metric = %kind,
            timestamp = now,
            "reading older than latest entry, not appending"
        ),
    }
}

/// Folds one merged snapshot into the profile's history.
///
/// Every account contributes a follower reading; YouTube accounts also
/// contribute a views reading. `now` (epoch ms) stamps every appended entry.
#[must_use]
pub fn add_history(snapshot: &ProfileStatsSnapshot, prior: Option<HistoryLog>, now: i64) -> HistoryLog {
    let mut log = prior.unwrap_or_default();

    for account in snapshot.accounts() {
        record_metric(&mut log, account, MetricKind::Followers, now);
    }
    for account in snapshot.bucket(Platform::YouTube) {
        record_metric(&mut log, account, MetricKind::Views, now);
    }

    log
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

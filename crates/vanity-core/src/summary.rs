use serde::{Deserialize, Serialize};

use crate::stats::ProfileStatsSnapshot;

/// Cross-platform follower total for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanityPlateSum {
    /// The profile id.
    pub username: String,
    pub display_name: String,
    pub total_followers: i64,
}

/// Every profile's sum from one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanityPlateSumCollection {
    /// Epoch milliseconds of the run.
    pub time_retrieved: i64,
    #[serde(default)]
    pub sums: Vec<VanityPlateSum>,
}

impl VanityPlateSumCollection {
    #[must_use]
    pub fn new(time_retrieved: i64) -> Self {
        Self {
            time_retrieved,
            sums: Vec::new(),
        }
    }

    /// Sums ordered by total followers, largest first. Ties keep their
    /// collection order.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<&VanityPlateSum> {
        let mut ranked: Vec<&VanityPlateSum> = self.sums.iter().collect();
        ranked.sort_by(|a, b| b.total_followers.cmp(&a.total_followers));
        ranked
    }

    /// Replaces the sum for `sum.username`, or appends it if absent.
    pub fn upsert(&mut self, sum: VanityPlateSum) {
        match self.sums.iter_mut().find(|s| s.username == sum.username) {
            Some(existing) => *existing = sum,
            None => self.sums.push(sum),
        }
    }
}

/// Adds up every account's follower count. Sentinel counts contribute
/// nothing.
#[must_use]
pub fn summarize(profile_id: &str, display_name: &str, snapshot: &ProfileStatsSnapshot) -> VanityPlateSum {
    let total_followers = snapshot
        .accounts()
        .map(|a| a.base.follower_count)
        .filter(|&n| n > 0)
        .sum();

    VanityPlateSum {
        username: profile_id.to_string(),
        display_name: display_name.to_string(),
        total_followers,
    }
}

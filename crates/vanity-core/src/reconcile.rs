use std::collections::HashMap;

use crate::merge::{merge_account_with_decision, MergeDecision};
use crate::platform::Platform;
use crate::stats::{AccountKey, AccountStats, ProfileStatsSnapshot};

/// Tally of merge decisions for one profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub accepted: usize,
    pub icon_carried: usize,
    pub fell_back: usize,
    pub no_valid_previous: usize,
}

impl MergeReport {
    fn record(&mut self, decision: MergeDecision) {
        match decision {
            MergeDecision::Accepted => self.accepted += 1,
            MergeDecision::IconCarried => self.icon_carried += 1,
            MergeDecision::FellBack => self.fell_back += 1,
            MergeDecision::NoValidPrevious => self.no_valid_previous += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.accepted + self.icon_carried + self.fell_back + self.no_valid_previous
    }
}

/// Merges every account of `new` against its counterpart in `old`.
#[must_use]
pub fn merge_snapshots(
    old: Option<&ProfileStatsSnapshot>,
    new: ProfileStatsSnapshot,
) -> ProfileStatsSnapshot {
    merge_snapshots_with_report(old, new).0
}

/// Merges every account of `new` against its counterpart in `old`.
///
/// Accounts are joined on [`AccountKey`]; if `old` holds the same key twice
/// the first one wins. The result has exactly `new`'s accounts, in `new`'s
/// order within each bucket, and takes `id`, `display_name` and
/// `time_retrieved` from `new`. Accounts only present in `old` are dropped.
#[must_use]
pub fn merge_snapshots_with_report(
    old: Option<&ProfileStatsSnapshot>,
    mut new: ProfileStatsSnapshot,
) -> (ProfileStatsSnapshot, MergeReport) {
    let mut previous: HashMap<AccountKey, &AccountStats> = HashMap::new();
    if let Some(old) = old {
        for account in old.accounts() {
            previous.entry(account.key()).or_insert(account);
        }
    }

    let mut merged = ProfileStatsSnapshot::new(&new.id, &new.display_name);
    merged.time_retrieved = new.time_retrieved;
    let mut report = MergeReport::default();

    for platform in Platform::ALL {
        for account in std::mem::take(new.bucket_mut(platform)) {
            let prior = previous.get(&account.key()).copied();
            let (result, decision) = merge_account_with_decision(prior, account);
            report.record(decision);
            merged.bucket_mut(platform).push(result);
        }
    }

    tracing::debug!(
        profile = %merged.id,
        accounts = report.total(),
        fell_back = report.fell_back,
        icon_carried = report.icon_carried,
        "merged profile snapshot"
    );

    (merged, report)
}

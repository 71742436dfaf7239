//! Field merge engine: reconciles a fresh reading of one account against the
//! last stored reading of the same account.

use crate::stats::AccountStats;
use crate::validity::{is_valid, validate};

/// Which path [`merge_account_with_decision`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// New reading taken as-is.
    Accepted,
    /// New reading taken, avatar carried over from the old record.
    IconCarried,
    /// New reading rejected, old record kept unchanged.
    FellBack,
    /// New reading invalid and nothing valid to fall back on; kept anyway.
    NoValidPrevious,
}

/// Merges `new` over `old`. See [`merge_account_with_decision`].
#[must_use]
pub fn merge_account(old: Option<&AccountStats>, new: AccountStats) -> AccountStats {
    merge_account_with_decision(old, new).0
}

/// Merges `new` over `old` and reports the path taken.
///
/// An invalid `new` is replaced wholesale by a valid `old`. A valid `new`
/// always wins, except that an empty avatar is backfilled from `old`.
#[must_use]
pub fn merge_account_with_decision(
    old: Option<&AccountStats>,
    new: AccountStats,
) -> (AccountStats, MergeDecision) {
    if !is_valid(&new) {
        return match old {
            Some(old) if validate(old).is_empty() => {
                tracing::info!(
                    platform = %new.platform(),
                    username = new.username(),
                    "new reading rejected, keeping previous record"
                );
                (old.clone(), MergeDecision::FellBack)
            }
            _ => {
                tracing::info!(
                    platform = %new.platform(),
                    username = new.username(),
                    "no previous valid record found, keeping new reading"
                );
                (new, MergeDecision::NoValidPrevious)
            }
        };
    }

    let mut merged = new;
    if let Some(old) = old {
        if !merged.has_icon() && old.has_icon() {
            tracing::info!(
                platform = %merged.platform(),
                username = merged.username(),
                "icon missing, carrying previous icon"
            );
            merged.base.icon_url.clone_from(&old.base.icon_url);
            merged.base.icon_base64.clone_from(&old.base.icon_base64);
            return (merged, MergeDecision::IconCarried);
        }
    }
    (merged, MergeDecision::Accepted)
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;

//! Decides whether a scraped record is trustworthy enough to persist.

use crate::stats::{AccountStats, PlatformDetail};

/// Why a record failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// Count is the sentinel (`< 0`).
    Unknown,
    /// Count must be strictly positive on this platform.
    NotPositive,
    Empty,
    NeverRetrieved,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Problem::Unknown => write!(f, "not retrieved"),
            Problem::NotPositive => write!(f, "must be greater than zero"),
            Problem::Empty => write!(f, "empty"),
            Problem::NeverRetrieved => write!(f, "retrieval time never set"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityIssue {
    /// Field name as it appears in the stored document.
    pub field: &'static str,
    pub problem: Problem,
}

impl std::fmt::Display for ValidityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

struct Checks<'a> {
    issues: &'a mut Vec<ValidityIssue>,
}

impl Checks<'_> {
    fn non_negative(&mut self, field: &'static str, value: i64) {
        if value < 0 {
            self.issues.push(ValidityIssue {
                field,
                problem: Problem::Unknown,
            });
        }
    }

    fn positive(&mut self, field: &'static str, value: i64) {
        if value <= 0 {
            self.issues.push(ValidityIssue {
                field,
                problem: Problem::NotPositive,
            });
        }
    }

    fn non_empty(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.issues.push(ValidityIssue {
                field,
                problem: Problem::Empty,
            });
        }
    }

    fn retrieved(&mut self, time_retrieved: i64) {
        if time_retrieved <= 0 {
            self.issues.push(ValidityIssue {
                field: "timeRetrieved",
                problem: Problem::NeverRetrieved,
            });
        }
    }
}

/// Every reason `record` is not trustworthy. Empty means valid.
///
/// Twitter is the strict platform: every count must be positive and the
/// link and username must be present. Instagram additionally requires an
/// icon and a post count. Everything else only needs a retrieval time and
/// a non-negative follower count.
#[must_use]
pub fn validate(record: &AccountStats) -> Vec<ValidityIssue> {
    let mut issues = Vec::new();
    let mut check = Checks {
        issues: &mut issues,
    };
    let base = &record.base;

    check.retrieved(base.time_retrieved);

    match &record.detail {
        PlatformDetail::Twitter(detail) => {
            check.non_empty("link", &base.link);
            check.non_empty("username", &base.username);
            check.positive("totalTweets", detail.total_tweets);
            check.positive("followerCount", base.follower_count);
            check.positive("followingCount", base.following_count);
        }
        PlatformDetail::Instagram(detail) => {
            check.non_empty("iconBase64", &base.icon_base64);
            check.non_negative("totalPosts", detail.total_posts);
            check.non_negative("followerCount", base.follower_count);
            check.non_negative("followingCount", base.following_count);
        }
        PlatformDetail::YouTube(_)
        | PlatformDetail::TikTok(_)
        | PlatformDetail::Threads
        | PlatformDetail::Twitch
        | PlatformDetail::SoundCloud(_)
        | PlatformDetail::Spotify(_)
        | PlatformDetail::Newgrounds(_)
        | PlatformDetail::Facebook => {
            check.non_negative("followerCount", base.follower_count);
        }
    }

    issues
}

/// True when `record` passes [`validate`]. Each issue found is logged at
/// `warn` with the account and platform; the record is never modified.
#[must_use]
pub fn is_valid(record: &AccountStats) -> bool {
    let issues = validate(record);
    for issue in &issues {
        tracing::warn!(
            platform = %record.platform(),
            username = record.username(),
            field = issue.field,
            problem = %issue.problem,
            "invalid stat field"
        );
    }
    issues.is_empty()
}

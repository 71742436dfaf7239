use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, Platform};

use super::{blank, count_or_unknown};
use crate::html::first_capture;

static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)>\s*([\d.,]+\s*[kmb]?)\s+followers\s*</a>").expect("valid regex")
});
static FOLLOWING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)>\s*([\d.,]+\s*[kmb]?)\s+following\s*</a>").expect("valid regex")
});
static USER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"user":\{[^{}]*?"name":"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});
static PROFILE_PIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"profilePicLarge":\{[^{}]*?"uri":"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});

/// Undoes JSON string escaping (`\/`, `\u00e9`) on a value captured from an
/// embedded script payload.
fn unescape_json(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.replace('\\', ""))
}

/// Extracts a page from the follower/following anchors and the embedded
/// relay payload that carries the page name and large profile picture.
#[must_use]
pub fn parse_facebook(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::Facebook, username);

    stats.base.follower_count = count_or_unknown(first_capture(&FOLLOWERS_RE, html).as_deref());
    stats.base.following_count = count_or_unknown(first_capture(&FOLLOWING_RE, html).as_deref());
    stats.base.display_name = USER_NAME_RE
        .captures(html)
        .map(|c| unescape_json(&c[1]))
        .unwrap_or_default();
    stats.base.icon_url = PROFILE_PIC_RE
        .captures(html)
        .map(|c| unescape_json(&c[1]))
        .unwrap_or_default();
    stats
}

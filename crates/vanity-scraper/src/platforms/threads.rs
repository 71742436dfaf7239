use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, Platform};

use super::{blank, count_or_unknown};
use crate::html::{find_meta_content, first_capture};

static TITLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*?)\s*\(@").expect("valid regex"));
static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([\d.,]+\s*[kmb]?)\s+Followers").expect("valid regex")
});

/// Extracts a profile from the `og:title` ("Name (@handle) ...") and the
/// meta description ("N Followers • M Threads • ...").
#[must_use]
pub fn parse_threads(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::Threads, username);

    if let Some(title) = find_meta_content(html, "property", "og:title") {
        stats.base.display_name = first_capture(&TITLE_NAME_RE, &title).unwrap_or_default();
    }
    let description = find_meta_content(html, "name", "description")
        .or_else(|| find_meta_content(html, "property", "og:description"))
        .unwrap_or_default();
    stats.base.follower_count =
        count_or_unknown(first_capture(&FOLLOWERS_RE, &description).as_deref());
    stats.base.icon_url = find_meta_content(html, "property", "og:image").unwrap_or_default();
    stats
}

use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, Platform, PlatformDetail, YoutubeDetail};

use super::{blank, count_or_unknown};
use crate::html::{find_meta_content, first_capture, strip_tags};

static ABOUT_CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<td[^>]*ytd-about-channel-renderer[^>]*>(.*?)</td>").expect("valid regex")
});
static HEADER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<yt-page-header-renderer.*?<h1[^>]*>\s*<span[^>]*>(.*?)</span>")
        .expect("valid regex")
});
static AVATAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="(https://yt3\.[^"]+)""#).expect("valid regex"));

/// Extracts a channel from its `/about` page.
///
/// Subscriber and view totals come from the about-panel table cells, whose
/// first word is the count ("1.2M subscribers", "4,567,890 views").
#[must_use]
pub fn parse_youtube(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::YouTube, username);
    let mut total_views = vanity_core::UNKNOWN;

    for caps in ABOUT_CELL_RE.captures_iter(html) {
        let text = strip_tags(&caps[1]).to_lowercase();
        let first_word = text.split_whitespace().next();
        if text.contains("subscribers") {
            stats.base.follower_count = count_or_unknown(first_word);
        } else if text.contains("views") {
            total_views = count_or_unknown(first_word);
        }
    }

    stats.base.display_name = first_capture(&HEADER_NAME_RE, html)
        .or_else(|| find_meta_content(html, "property", "og:title"))
        .unwrap_or_default();
    stats.base.icon_url = first_capture(&AVATAR_RE, html)
        .or_else(|| find_meta_content(html, "property", "og:image"))
        .unwrap_or_default();
    stats.detail = PlatformDetail::YouTube(YoutubeDetail { total_views });
    stats
}

use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, InstagramDetail, Platform, PlatformDetail};

use super::{blank, count_or_unknown};
use crate::html::{extract_attr, find_meta_content};

static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^([\d.,]+\s*[kmb]?)\s+Followers,\s*([\d.,]+\s*[kmb]?)\s+Following,\s*([\d.,]+\s*[kmb]?)\s+Posts\s*-\s*See Instagram photos and videos from\s+(.*?)\s*\(@",
    )
    .expect("valid regex")
});
static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));

/// Extracts a profile from the `og:description` summary line:
/// `"X Followers, Y Following, Z Posts - See Instagram photos and videos from Name (@handle)"`.
#[must_use]
pub fn parse_instagram(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::Instagram, username);
    let mut total_posts = vanity_core::UNKNOWN;

    if let Some(description) = find_meta_content(html, "property", "og:description") {
        if let Some(caps) = DESCRIPTION_RE.captures(&description) {
            stats.base.follower_count = count_or_unknown(caps.get(1).map(|m| m.as_str()));
            stats.base.following_count = count_or_unknown(caps.get(2).map(|m| m.as_str()));
            total_posts = count_or_unknown(caps.get(3).map(|m| m.as_str()));
            stats.base.display_name = caps
                .get(4)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
        }
    }

    stats.base.icon_url = profile_picture(html)
        .or_else(|| find_meta_content(html, "property", "og:image"))
        .unwrap_or_default();
    stats.detail = PlatformDetail::Instagram(InstagramDetail { total_posts });
    stats
}

/// `src` of the `<img>` whose alt text is "<name>'s profile picture".
fn profile_picture(html: &str) -> Option<String> {
    IMG_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let alt = extract_attr(tag, "alt")?;
        if alt.ends_with("profile picture") {
            extract_attr(tag, "src")
        } else {
            None
        }
    })
}

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use vanity_core::{AccountStats, Platform, PlatformDetail, SpotifyDetail};

use super::{blank, count_or_unknown};
use crate::html::{find_meta_content, first_capture};

static LD_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type="application/ld\+json"[^>]*>(.*?)</script>"#)
        .expect("valid regex")
});
static LISTENERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([\d.,]+\s*[kmb]?)\s+monthly listeners").expect("valid regex")
});

/// Extracts an artist page. The handle is the Spotify artist id; the
/// follower count is monthly listeners, read from the `ld+json` block's
/// description ("Artist · 1.2M monthly listeners.").
#[must_use]
pub fn parse_spotify(html: &str, artist_id: &str) -> AccountStats {
    let mut stats = blank(Platform::Spotify, artist_id);

    let ld = LD_JSON_RE
        .captures_iter(html)
        .filter_map(|caps| serde_json::from_str::<Value>(&caps[1]).ok())
        .find(|v| v.get("name").is_some());

    let description = ld
        .as_ref()
        .and_then(|v| v.get("description"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| find_meta_content(html, "property", "og:description"))
        .unwrap_or_default();
    stats.base.follower_count =
        count_or_unknown(first_capture(&LISTENERS_RE, &description).as_deref());

    stats.base.display_name = ld
        .as_ref()
        .and_then(|v| v.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| find_meta_content(html, "property", "og:title"))
        .unwrap_or_default();
    stats.base.icon_url = find_meta_content(html, "property", "og:image").unwrap_or_default();
    stats.detail = PlatformDetail::Spotify(SpotifyDetail {
        artist_id: artist_id.to_string(),
    });
    stats
}

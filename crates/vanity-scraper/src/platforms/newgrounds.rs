use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, NewgroundsDetail, Platform, PlatformDetail};

use super::{blank, count_or_unknown};
use crate::html::{find_meta_content, first_capture, strip_tags};

static FANS_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div class="pod">\s*<div class="pod-head">\s*<h2[^>]*>(.*?)</h2>"#)
        .expect("valid regex")
});
static FANS_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.*)'s?\s+([\d,]+)\s+Fans?$").expect("valid regex"));
static USER_ICON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)src="((?:https:)?//aicon\.ngfiles\.com/[^"]+)""#).expect("valid regex")
});

/// Profile-header counters, in `NewgroundsDetail` field order.
const COUNTERS: [&str; 8] = [
    "NEWS", "MOVIES", "ART", "AUDIO", "GAMES", "FAVES", "REVIEWS", "POSTS",
];

fn counter(html: &str, label: &str) -> i64 {
    let pattern = format!(
        r"(?is)<span[^>]*>\s*{label}\s*</span>.{{0,200}}?<strong[^>]*>\s*([\d.,]+\s*[kmb]?)\s*</strong>"
    );
    let raw = Regex::new(&pattern)
        .ok()
        .and_then(|re| first_capture(&re, html));
    count_or_unknown(raw.as_deref())
}

/// Extracts a profile from the `/fans` page: the pod header reads
/// "Name's 1,234 Fans" and the user bar carries one counter per content
/// type.
#[must_use]
pub fn parse_newgrounds(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::Newgrounds, username);

    if let Some(header) = first_capture(&FANS_HEADER_RE, html) {
        let text = strip_tags(&header);
        if let Some(caps) = FANS_TEXT_RE.captures(&text) {
            stats.base.display_name = caps[1].trim().to_string();
            stats.base.follower_count = count_or_unknown(Some(&caps[2]));
        }
    }

    let [news, movies, art, audio, games, faves, reviews, posts] =
        COUNTERS.map(|label| counter(html, label));
    stats.detail = PlatformDetail::Newgrounds(NewgroundsDetail {
        news_count: news,
        movies_count: movies,
        art_count: art,
        audio_count: audio,
        games_count: games,
        faves_count: faves,
        reviews_count: reviews,
        posts_count: posts,
    });

    stats.base.icon_url = first_capture(&USER_ICON_RE, html)
        .map(|src| {
            if src.starts_with("//") {
                format!("https:{src}")
            } else {
                src
            }
        })
        .or_else(|| find_meta_content(html, "property", "og:image"))
        .unwrap_or_default();
    stats
}

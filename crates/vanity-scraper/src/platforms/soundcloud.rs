use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, Platform, PlatformDetail, SoundCloudDetail};

use super::{blank, count_or_unknown};
use crate::html::{extract_attr, find_meta_content, first_capture, strip_tags};

static STAT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*class="[^"]*infoStats__statLink[^"]*"[^>]*>"#).expect("valid regex")
});
static USERNAME_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)class="[^"]*soundTitle__usernameText[^"]*"[^>]*>(.*?)</"#)
        .expect("valid regex")
});
static BACKGROUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)background-image:\s*url\((?:&quot;|["'])?(https?://[^"'&)]+)"#)
        .expect("valid regex")
});
static FOLLOWERS_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([\d,]+)\s+followers?$").expect("valid regex"));
static FOLLOWING_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^following\s+([\d,]+)\s+(?:people|person)$").expect("valid regex"));
static TRACKS_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([\d,]+)\s+tracks?$").expect("valid regex"));

/// Extracts a profile from the `infoStats` link titles
/// ("1,234 followers", "Following 56 people", "78 tracks").
#[must_use]
pub fn parse_soundcloud(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::SoundCloud, username);
    let mut tracks = vanity_core::UNKNOWN;

    for tag in STAT_LINK_RE.find_iter(html) {
        let Some(title) = extract_attr(tag.as_str(), "title") else {
            continue;
        };
        if let Some(n) = first_capture(&FOLLOWERS_TITLE_RE, &title) {
            stats.base.follower_count = count_or_unknown(Some(&n));
        } else if let Some(n) = first_capture(&FOLLOWING_TITLE_RE, &title) {
            stats.base.following_count = count_or_unknown(Some(&n));
        } else if let Some(n) = first_capture(&TRACKS_TITLE_RE, &title) {
            tracks = count_or_unknown(Some(&n));
        }
    }

    stats.base.display_name = first_capture(&USERNAME_TEXT_RE, html)
        .map(|name| strip_tags(&name))
        .or_else(|| find_meta_content(html, "property", "og:title"))
        .unwrap_or_default();
    stats.base.icon_url = first_capture(&BACKGROUND_RE, html)
        .or_else(|| find_meta_content(html, "property", "og:image"))
        .unwrap_or_default();
    stats.detail = PlatformDetail::SoundCloud(SoundCloudDetail { tracks });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_info_stats_titles() {
        let html = r#"
<span style="background-image: url(&quot;https://i1.sndcdn.com/avatars-000-t500x500.jpg&quot;);" class="sc-artwork"></span>
<h2 class="profileHeaderInfo__userName"><span class="soundTitle__usernameText">Kero Kero Bonito</span></h2>
<table class="infoStats__table"><tr>
<td><a href="/kerokerobonito/followers" title="182,345 followers" class="infoStats__statLink sc-link-light">Followers</a></td>
<td><a href="/kerokerobonito/following" title="Following 21 people" class="infoStats__statLink sc-link-light">Following</a></td>
<td><a href="/kerokerobonito/tracks" title="64 tracks" class="infoStats__statLink sc-link-light">Tracks</a></td>
</tr></table>"#;
        let stats = parse_soundcloud(html, "kerokerobonito");
        assert_eq!(stats.base.display_name, "Kero Kero Bonito");
        assert_eq!(stats.base.follower_count, 182_345);
        assert_eq!(stats.base.following_count, 21);
        assert_eq!(stats.base.link, "https://soundcloud.com/kerokerobonito");
        assert_eq!(
            stats.base.icon_url,
            "https://i1.sndcdn.com/avatars-000-t500x500.jpg"
        );
        assert_eq!(
            stats.detail,
            PlatformDetail::SoundCloud(SoundCloudDetail { tracks: 64 })
        );
    }

    #[test]
    fn single_follower_title() {
        let html = r#"<a class="infoStats__statLink" title="1 follower">x</a>"#;
        assert_eq!(parse_soundcloud(html, "new").base.follower_count, 1);
    }
}

use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, Platform, PlatformDetail, TiktokDetail};

use super::{blank, count_or_unknown};
use crate::html::{find_meta_content, first_capture};

static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| counter("followers-count"));
static FOLLOWING_RE: LazyLock<Regex> = LazyLock::new(|| counter("following-count"));
static LIKES_RE: LazyLock<Regex> = LazyLock::new(|| counter("likes-count"));
static SUBTITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)data-e2e="user-subtitle"[^>]*>([^<]+)<"#).expect("valid regex")
});

fn counter(e2e: &str) -> Regex {
    Regex::new(&format!(r#"(?is)data-e2e="{e2e}"[^>]*>([^<]+)<"#)).expect("valid regex")
}

/// Extracts a profile from the `data-e2e` counters on the profile header.
#[must_use]
pub fn parse_tiktok(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::TikTok, username);

    stats.base.follower_count = count_or_unknown(first_capture(&FOLLOWERS_RE, html).as_deref());
    stats.base.following_count = count_or_unknown(first_capture(&FOLLOWING_RE, html).as_deref());
    let likes = count_or_unknown(first_capture(&LIKES_RE, html).as_deref());

    stats.base.display_name = first_capture(&SUBTITLE_RE, html).unwrap_or_default();
    stats.base.icon_url = find_meta_content(html, "property", "og:image").unwrap_or_default();
    stats.detail = PlatformDetail::TikTok(TiktokDetail { likes });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_e2e_counters() {
        let html = r#"
<meta property="og:image" content="https://p16-sign.tiktokcdn.com/avatar.jpeg">
<h2 data-e2e="user-subtitle" class="css-1">Smosh</h2>
<strong title="Following" data-e2e="following-count">42</strong>
<strong title="Followers" data-e2e="followers-count">3.1M</strong>
<strong title="Likes" data-e2e="likes-count">120.5M</strong>"#;
        let stats = parse_tiktok(html, "smosh");
        assert_eq!(stats.base.display_name, "Smosh");
        assert_eq!(stats.base.follower_count, 3_100_000);
        assert_eq!(stats.base.following_count, 42);
        assert_eq!(stats.base.link, "https://www.tiktok.com/@smosh?lang=en");
        assert_eq!(
            stats.base.icon_url,
            "https://p16-sign.tiktokcdn.com/avatar.jpeg"
        );
        assert_eq!(
            stats.detail,
            PlatformDetail::TikTok(TiktokDetail { likes: 120_500_000 })
        );
    }

    #[test]
    fn missing_likes_counter_is_unknown() {
        let html = r#"<strong data-e2e="followers-count">10</strong>"#;
        let stats = parse_tiktok(html, "tiny");
        assert_eq!(stats.base.follower_count, 10);
        assert_eq!(
            stats.detail,
            PlatformDetail::TikTok(TiktokDetail {
                likes: vanity_core::UNKNOWN
            })
        );
    }
}

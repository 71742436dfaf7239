use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, Platform, PlatformDetail, TwitterDetail};

use super::{blank, count_or_unknown};
use crate::html::{first_capture, strip_tags};

static FULLNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)class="profile-card-fullname"[^>]*>(.*?)</a>"#).expect("valid regex")
});
static TWEETS_RE: LazyLock<Regex> = LazyLock::new(|| stat("posts"));
static FOLLOWING_RE: LazyLock<Regex> = LazyLock::new(|| stat("following"));
static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| stat("followers"));
static AVATAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)class="profile-card-avatar"[^>]*>\s*<img[^>]*src="([^"]+)""#)
        .expect("valid regex")
});

fn stat(class: &str) -> Regex {
    Regex::new(&format!(
        r#"(?is)<li class="{class}">.*?class="profile-stat-num">([^<]+)<"#
    ))
    .expect("valid regex")
}

/// Extracts a profile from a Nitter profile card.
///
/// The avatar `src` on Nitter is usually relative (`/pic/...`); the client
/// resolves it against the page it fetched.
#[must_use]
pub fn parse_twitter(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::Twitter, username);

    stats.base.display_name = first_capture(&FULLNAME_RE, html)
        .map(|name| strip_tags(&name))
        .unwrap_or_default();
    stats.base.follower_count = count_or_unknown(first_capture(&FOLLOWERS_RE, html).as_deref());
    stats.base.following_count = count_or_unknown(first_capture(&FOLLOWING_RE, html).as_deref());
    let total_tweets = count_or_unknown(first_capture(&TWEETS_RE, html).as_deref());
    stats.base.icon_url = first_capture(&AVATAR_RE, html).unwrap_or_default();
    stats.detail = PlatformDetail::Twitter(TwitterDetail { total_tweets });
    stats
}

use std::sync::LazyLock;

use regex::Regex;
use vanity_core::{AccountStats, Platform};

use super::{blank, count_or_unknown};
use crate::html::{first_capture, page_title};

static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)>\s*([\d.,]+\s*[kmb]?)\s+followers\s*</p>").expect("valid regex")
});
static AVATAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"content="(https://static-cdn\.jtvnw\.net/jtv_user_pictures[^"]*?300x300\.(?:png|jpe?g))""#,
    )
    .expect("valid regex")
});

#[must_use]
pub fn parse_twitch(html: &str, username: &str) -> AccountStats {
    let mut stats = blank(Platform::Twitch, username);

    stats.base.follower_count = count_or_unknown(first_capture(&FOLLOWERS_RE, html).as_deref());
    stats.base.display_name = page_title(html)
        .and_then(|t| t.strip_suffix(" - Twitch").map(str::to_string))
        .unwrap_or_default();
    stats.base.icon_url = first_capture(&AVATAR_RE, html).unwrap_or_default();
    stats
}

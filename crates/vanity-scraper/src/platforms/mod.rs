//! Per-platform profile page locations and extractors.
//!
//! Every extractor is a pure function over fetched page text. It fills what
//! it can find and leaves the rest at the unknown sentinel; it never sets
//! `timeRetrieved` or `iconBase64`, which the client owns.

mod facebook;
mod instagram;
mod newgrounds;
mod soundcloud;
mod spotify;
mod threads;
mod tiktok;
mod twitch;
mod twitter;
mod youtube;

use vanity_core::{AccountStats, Platform};

use crate::count::parse_abbreviated_count;

pub use facebook::parse_facebook;
pub use instagram::parse_instagram;
pub use newgrounds::parse_newgrounds;
pub use soundcloud::parse_soundcloud;
pub use spotify::parse_spotify;
pub use threads::parse_threads;
pub use tiktok::parse_tiktok;
pub use twitch::parse_twitch;
pub use twitter::parse_twitter;
pub use youtube::parse_youtube;

/// Scheme and host each platform is normally fetched from.
fn origin(platform: Platform) -> &'static str {
    match platform {
        Platform::YouTube => "https://www.youtube.com",
        Platform::Instagram => "https://www.instagram.com",
        Platform::TikTok => "https://www.tiktok.com",
        Platform::Twitter => "https://twitter.com",
        Platform::Threads => "https://www.threads.net",
        Platform::Twitch => "https://www.twitch.tv",
        Platform::SoundCloud => "https://soundcloud.com",
        Platform::Spotify => "https://open.spotify.com",
        Platform::Newgrounds => "https://www.newgrounds.com",
        Platform::Facebook => "https://www.facebook.com",
    }
}

fn page_path(platform: Platform, username: &str) -> String {
    match platform {
        Platform::YouTube => format!("/@{username}/about"),
        Platform::Instagram => format!("/{username}/"),
        Platform::TikTok => format!("/@{username}?lang=en"),
        Platform::Threads => format!("/@{username}"),
        Platform::Spotify => format!("/artist/{username}"),
        Platform::Newgrounds => format!("/{username}/fans"),
        Platform::Twitter | Platform::Twitch | Platform::SoundCloud | Platform::Facebook => {
            format!("/{username}")
        }
    }
}

/// URL of the page the extractor for `platform` expects.
///
/// `base_url` replaces the platform origin when fetching through a mirror.
/// Newgrounds profiles live on a per-user subdomain, so without a mirror
/// the handle moves into the host.
#[must_use]
pub fn page_url(platform: Platform, username: &str, base_url: Option<&str>) -> String {
    match (platform, base_url) {
        (Platform::Newgrounds, None) => format!("https://{username}.newgrounds.com/fans"),
        (_, Some(base)) => format!("{}{}", base.trim_end_matches('/'), page_path(platform, username)),
        (_, None) => format!("{}{}", origin(platform), page_path(platform, username)),
    }
}

/// Canonical public link stored in the record's `link` field.
#[must_use]
pub fn profile_link(platform: Platform, username: &str) -> String {
    match platform {
        Platform::YouTube => format!("https://www.youtube.com/@{username}/"),
        Platform::Instagram => format!("https://www.instagram.com/{username}"),
        Platform::Twitter => format!("https://twitter.com/{username}"),
        Platform::Newgrounds => format!("https://{username}.newgrounds.com/"),
        _ => page_url(platform, username, None),
    }
}

/// Runs the extractor for `platform` over `html`.
#[must_use]
pub fn parse_profile(platform: Platform, html: &str, username: &str) -> AccountStats {
    match platform {
        Platform::YouTube => parse_youtube(html, username),
        Platform::Instagram => parse_instagram(html, username),
        Platform::TikTok => parse_tiktok(html, username),
        Platform::Twitter => parse_twitter(html, username),
        Platform::Threads => parse_threads(html, username),
        Platform::Twitch => parse_twitch(html, username),
        Platform::SoundCloud => parse_soundcloud(html, username),
        Platform::Spotify => parse_spotify(html, username),
        Platform::Newgrounds => parse_newgrounds(html, username),
        Platform::Facebook => parse_facebook(html, username),
    }
}

/// Starting point for every extractor: sentinel counts, the requested
/// handle, and the canonical link.
fn blank(platform: Platform, username: &str) -> AccountStats {
    let mut stats = AccountStats::unretrieved(platform, username);
    stats.base.link = profile_link(platform, username);
    stats
}

/// Parses a captured count, keeping the sentinel when the text is absent or
/// unreadable.
fn count_or_unknown(raw: Option<&str>) -> i64 {
    raw.and_then(parse_abbreviated_count)
        .unwrap_or(vanity_core::UNKNOWN)
}

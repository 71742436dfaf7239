use serde::{Deserialize, Serialize};

/// Social platforms whose public pages are tracked.
///
/// Serialized with the display names used by the persisted documents, so
/// `Platform::TikTok` round-trips as `"Tik Tok"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "YouTube")]
    YouTube,
    #[serde(rename = "Instagram")]
    Instagram,
    #[serde(rename = "Tik Tok")]
    TikTok,
    #[serde(rename = "Twitter")]
    Twitter,
    #[serde(rename = "Threads")]
    Threads,
    #[serde(rename = "Twitch")]
    Twitch,
    #[serde(rename = "SoundCloud")]
    SoundCloud,
    #[serde(rename = "Spotify")]
    Spotify,
    #[serde(rename = "Newgrounds")]
    Newgrounds,
    #[serde(rename = "Facebook")]
    Facebook,
}

impl Platform {
    /// Every platform, in the order snapshot buckets are iterated.
    pub const ALL: [Platform; 10] = [
        Platform::YouTube,
        Platform::Instagram,
        Platform::TikTok,
        Platform::Twitter,
        Platform::Threads,
        Platform::Twitch,
        Platform::SoundCloud,
        Platform::Spotify,
        Platform::Newgrounds,
        Platform::Facebook,
    ];

    /// Display name, identical to the serialized `platformName` value.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "Tik Tok",
            Platform::Twitter => "Twitter",
            Platform::Threads => "Threads",
            Platform::Twitch => "Twitch",
            Platform::SoundCloud => "SoundCloud",
            Platform::Spotify => "Spotify",
            Platform::Newgrounds => "Newgrounds",
            Platform::Facebook => "Facebook",
        }
    }

    /// What the platform calls its followers. Display only.
    #[must_use]
    pub fn default_follower_label(self) -> &'static str {
        match self {
            Platform::YouTube => "Subscribers",
            Platform::Newgrounds => "Fans",
            Platform::Spotify => "Monthly Listeners",
            Platform::Instagram
            | Platform::TikTok
            | Platform::Twitter
            | Platform::Threads
            | Platform::Twitch
            | Platform::SoundCloud
            | Platform::Facebook => "Followers",
        }
    }

    /// Key of this platform's bucket inside a snapshot document.
    #[must_use]
    pub fn bucket_key(self) -> &'static str {
        match self {
            Platform::YouTube => "youtubeStats",
            Platform::Instagram => "instaStats",
            Platform::TikTok => "tiktokStats",
            Platform::Twitter => "twitterStats",
            Platform::Threads => "threadsStats",
            Platform::Twitch => "twitchStats",
            Platform::SoundCloud => "soundcloudStats",
            Platform::Spotify => "spotifyStats",
            Platform::Newgrounds => "newgroundsStats",
            Platform::Facebook => "facebookStats",
        }
    }

    /// Looks a platform up by its serialized display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Platform> {
        Platform::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

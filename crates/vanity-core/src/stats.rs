//! Normalized per-account stat records and the per-profile snapshot that
//! groups them by platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::MetricKind;
use crate::platform::Platform;

/// Reserved value for counts and timestamps that were not retrieved.
/// Never a legitimate reading.
pub const UNKNOWN: i64 = -1;

fn unknown() -> i64 {
    UNKNOWN
}

/// Composite join key for an account across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey {
    pub platform: Platform,
    pub username: String,
}

impl std::fmt::Display for AccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{} on {}", self.username, self.platform)
    }
}

/// Fields every platform record carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsBase {
    /// Epoch milliseconds of the scrape, [`UNKNOWN`] when never retrieved.
    pub time_retrieved: i64,
    pub link: String,
    /// Non-unique, cosmetic.
    pub display_name: String,
    /// Unique within the platform; half of the [`AccountKey`].
    pub username: String,
    pub follower_count: i64,
    /// Display synonym for "followers" (Fans, Subscribers, Listeners).
    pub follower_label: String,
    pub following_count: i64,
    /// Avatar as a `data:` URI. Empty when unresolved.
    pub icon_base64: String,
    pub icon_url: String,
}

impl Default for StatsBase {
    fn default() -> Self {
        Self {
            time_retrieved: UNKNOWN,
            link: String::new(),
            display_name: String::new(),
            username: String::new(),
            follower_count: UNKNOWN,
            follower_label: "Followers".to_string(),
            following_count: UNKNOWN,
            icon_base64: String::new(),
            icon_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YoutubeDetail {
    pub total_views: i64,
}

impl Default for YoutubeDetail {
    fn default() -> Self {
        Self {
            total_views: UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstagramDetail {
    pub total_posts: i64,
}

impl Default for InstagramDetail {
    fn default() -> Self {
        Self {
            total_posts: UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiktokDetail {
    pub likes: i64,
}

impl Default for TiktokDetail {
    fn default() -> Self {
        Self { likes: UNKNOWN }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwitterDetail {
    pub total_tweets: i64,
}

impl Default for TwitterDetail {
    fn default() -> Self {
        Self {
            total_tweets: UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundCloudDetail {
    pub tracks: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpotifyDetail {
    pub artist_id: String,
}

/// Post and activity counters shown on a Newgrounds fan page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewgroundsDetail {
    pub news_count: i64,
    pub movies_count: i64,
    pub art_count: i64,
    pub audio_count: i64,
    pub games_count: i64,
    pub faves_count: i64,
    pub reviews_count: i64,
    pub posts_count: i64,
}

/// Platform-specific payload, tagged by `platformName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platformName")]
pub enum PlatformDetail {
    #[serde(rename = "YouTube")]
    YouTube(YoutubeDetail),
    #[serde(rename = "Instagram")]
    Instagram(InstagramDetail),
    #[serde(rename = "Tik Tok")]
    TikTok(TiktokDetail),
    #[serde(rename = "Twitter")]
    Twitter(TwitterDetail),
    #[serde(rename = "Threads")]
    Threads,
    #[serde(rename = "Twitch")]
    Twitch,
    #[serde(rename = "SoundCloud")]
    SoundCloud(SoundCloudDetail),
    #[serde(rename = "Spotify")]
    Spotify(SpotifyDetail),
    #[serde(rename = "Newgrounds")]
    Newgrounds(NewgroundsDetail),
    #[serde(rename = "Facebook")]
    Facebook,
}

impl PlatformDetail {
    /// The empty (all-sentinel) payload for `platform`.
    #[must_use]
    pub fn empty(platform: Platform) -> Self {
        match platform {
            Platform::YouTube => PlatformDetail::YouTube(YoutubeDetail::default()),
            Platform::Instagram => PlatformDetail::Instagram(InstagramDetail::default()),
            Platform::TikTok => PlatformDetail::TikTok(TiktokDetail::default()),
            Platform::Twitter => PlatformDetail::Twitter(TwitterDetail::default()),
            Platform::Threads => PlatformDetail::Threads,
            Platform::Twitch => PlatformDetail::Twitch,
            Platform::SoundCloud => PlatformDetail::SoundCloud(SoundCloudDetail::default()),
            Platform::Spotify => PlatformDetail::Spotify(SpotifyDetail::default()),
            Platform::Newgrounds => PlatformDetail::Newgrounds(NewgroundsDetail::default()),
            Platform::Facebook => PlatformDetail::Facebook,
        }
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            PlatformDetail::YouTube(_) => Platform::YouTube,
            PlatformDetail::Instagram(_) => Platform::Instagram,
            PlatformDetail::TikTok(_) => Platform::TikTok,
            PlatformDetail::Twitter(_) => Platform::Twitter,
            PlatformDetail::Threads => Platform::Threads,
            PlatformDetail::Twitch => Platform::Twitch,
            PlatformDetail::SoundCloud(_) => Platform::SoundCloud,
            PlatformDetail::Spotify(_) => Platform::Spotify,
            PlatformDetail::Newgrounds(_) => Platform::Newgrounds,
            PlatformDetail::Facebook => Platform::Facebook,
        }
    }
}

/// One tracked account on one platform, as read on one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStats {
    #[serde(flatten)]
    pub base: StatsBase,
    #[serde(flatten)]
    pub detail: PlatformDetail,
}

impl AccountStats {
    /// An all-sentinel record for `username`, carrying the platform's
    /// default follower label. This is what a total scrape failure yields.
    #[must_use]
    pub fn unretrieved(platform: Platform, username: &str) -> Self {
        Self {
            base: StatsBase {
                username: username.to_string(),
                follower_label: platform.default_follower_label().to_string(),
                ..StatsBase::default()
            },
            detail: PlatformDetail::empty(platform),
        }
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.detail.platform()
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.base.username
    }

    #[must_use]
    pub fn key(&self) -> AccountKey {
        AccountKey {
            platform: self.platform(),
            username: self.base.username.clone(),
        }
    }

    /// Scrape time, or `None` when the record was never retrieved.
    #[must_use]
    pub fn retrieved_at(&self) -> Option<DateTime<Utc>> {
        if self.base.time_retrieved <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.base.time_retrieved)
    }

    /// Reading for the given history metric, if this platform reports it.
    #[must_use]
    pub fn metric(&self, kind: MetricKind) -> Option<i64> {
        match (kind, &self.detail) {
            (MetricKind::Followers, _) => Some(self.base.follower_count),
            (MetricKind::Views, PlatformDetail::YouTube(d)) => Some(d.total_views),
            (MetricKind::Likes, PlatformDetail::TikTok(d)) => Some(d.likes),
            (MetricKind::Views | MetricKind::Likes, _) => None,
        }
    }

    #[must_use]
    pub fn has_icon(&self) -> bool {
        !self.base.icon_base64.is_empty()
    }
}

impl std::fmt::Display for AccountStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = &self.base;
        writeln!(f, "{} {} Details:", self.platform(), b.display_name)?;
        writeln!(f, "Username (@): {}", b.username)?;
        write!(f, "{} Count: {}", b.follower_label, b.follower_count)?;
        if b.following_count > 0 {
            write!(f, "\nFollowing Count: {}", b.following_count)?;
        }
        match &self.detail {
            PlatformDetail::YouTube(d) => write!(f, "\nTotal Views: {}", d.total_views),
            PlatformDetail::Instagram(d) => write!(f, "\nTotal Posts: {}", d.total_posts),
            PlatformDetail::TikTok(d) => write!(f, "\nLikes: {}", d.likes),
            PlatformDetail::Twitter(d) => write!(f, "\nTotal Tweets: {}", d.total_tweets),
            PlatformDetail::SoundCloud(d) => write!(f, "\nTracks: {}", d.tracks),
            PlatformDetail::Newgrounds(d) => write!(
                f,
                "\nNews: {}; Movies: {}; Art: {}; Audio: {}; Games: {};\nFaves: {}; Reviews: {}; Posts: {};",
                d.news_count,
                d.movies_count,
                d.art_count,
                d.audio_count,
                d.games_count,
                d.faves_count,
                d.reviews_count,
                d.posts_count
            ),
            PlatformDetail::Spotify(_)
            | PlatformDetail::Threads
            | PlatformDetail::Twitch
            | PlatformDetail::Facebook => Ok(()),
        }
    }
}

/// Every current account record for one profile, bucketed by platform.
///
/// Buckets are explicit fields rather than a map so the document layout is
/// fixed; use [`ProfileStatsSnapshot::bucket`] and
/// [`ProfileStatsSnapshot::accounts`] to iterate them in [`Platform::ALL`]
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatsSnapshot {
    pub id: String,
    pub display_name: String,
    /// Epoch milliseconds of the run that produced this snapshot.
    pub time_retrieved: i64,
    pub youtube_stats: Vec<AccountStats>,
    pub insta_stats: Vec<AccountStats>,
    pub tiktok_stats: Vec<AccountStats>,
    pub twitter_stats: Vec<AccountStats>,
    pub threads_stats: Vec<AccountStats>,
    pub twitch_stats: Vec<AccountStats>,
    pub soundcloud_stats: Vec<AccountStats>,
    pub spotify_stats: Vec<AccountStats>,
    pub newgrounds_stats: Vec<AccountStats>,
    pub facebook_stats: Vec<AccountStats>,
}

impl ProfileStatsSnapshot {
    #[must_use]
    pub fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            time_retrieved: unknown(),
            youtube_stats: Vec::new(),
            insta_stats: Vec::new(),
            tiktok_stats: Vec::new(),
            twitter_stats: Vec::new(),
            threads_stats: Vec::new(),
            twitch_stats: Vec::new(),
            soundcloud_stats: Vec::new(),
            spotify_stats: Vec::new(),
            newgrounds_stats: Vec::new(),
            facebook_stats: Vec::new(),
        }
    }

    #[must_use]
    pub fn bucket(&self, platform: Platform) -> &[AccountStats] {
        match platform {
            Platform::YouTube => &self.youtube_stats,
            Platform::Instagram => &self.insta_stats,
            Platform::TikTok => &self.tiktok_stats,
            Platform::Twitter => &self.twitter_stats,
            Platform::Threads => &self.threads_stats,
            Platform::Twitch => &self.twitch_stats,
            Platform::SoundCloud => &self.soundcloud_stats,
            Platform::Spotify => &self.spotify_stats,
            Platform::Newgrounds => &self.newgrounds_stats,
            Platform::Facebook => &self.facebook_stats,
        }
    }

    pub fn bucket_mut(&mut self, platform: Platform) -> &mut Vec<AccountStats> {
        match platform {
            Platform::YouTube => &mut self.youtube_stats,
            Platform::Instagram => &mut self.insta_stats,
            Platform::TikTok => &mut self.tiktok_stats,
            Platform::Twitter => &mut self.twitter_stats,
            Platform::Threads => &mut self.threads_stats,
            Platform::Twitch => &mut self.twitch_stats,
            Platform::SoundCloud => &mut self.soundcloud_stats,
            Platform::Spotify => &mut self.spotify_stats,
            Platform::Newgrounds => &mut self.newgrounds_stats,
            Platform::Facebook => &mut self.facebook_stats,
        }
    }

    /// Appends `record` to the bucket of its own platform.
    pub fn push(&mut self, record: AccountStats) {
        self.bucket_mut(record.platform()).push(record);
    }

    /// All records, flattened across buckets in [`Platform::ALL`] order.
    pub fn accounts(&self) -> impl Iterator<Item = &AccountStats> + '_ {
        Platform::ALL
            .into_iter()
            .flat_map(move |platform| self.bucket(platform).iter())
    }

    /// First record matching `key`, if any.
    #[must_use]
    pub fn find(&self, key: &AccountKey) -> Option<&AccountStats> {
        self.bucket(key.platform)
            .iter()
            .find(|a| a.base.username == key.username)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        Platform::ALL.iter().map(|p| self.bucket(*p).len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

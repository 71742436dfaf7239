use super::*;
use crate::platform::Platform;
use crate::stats::{PlatformDetail, TwitterDetail, YoutubeDetail};

const ICON: &str = "data:image/png;base64,abc";

fn youtube(followers: i64, icon: &str) -> AccountStats {
    let mut stats = AccountStats::unretrieved(Platform::YouTube, "x");
    stats.base.time_retrieved = 1_700_000_000_000;
    stats.base.follower_count = followers;
    stats.base.display_name = "X".to_string();
    stats.base.icon_base64 = icon.to_string();
    stats.base.icon_url = if icon.is_empty() {
        String::new()
    } else {
        "https://yt3.example/x.jpg".to_string()
    };
    stats.detail = PlatformDetail::YouTube(YoutubeDetail { total_views: 9_000 });
    stats
}

fn failed_youtube() -> AccountStats {
    AccountStats::unretrieved(Platform::YouTube, "x")
}

#[test]
fn merging_valid_record_with_itself_is_identity() {
    let a = youtube(1000, ICON);
    assert_eq!(merge_account(Some(&a), a.clone()), a);

    let no_icon = youtube(1000, "");
    assert_eq!(merge_account(Some(&no_icon), no_icon.clone()), no_icon);
}

#[test]
fn invalid_new_falls_back_to_valid_old() {
    let old = youtube(1000, ICON);
    let (merged, decision) = merge_account_with_decision(Some(&old), failed_youtube());
    assert_eq!(merged, old);
    assert_eq!(decision, MergeDecision::FellBack);
}

#[test]
fn invalid_new_without_old_is_kept() {
    let new = failed_youtube();
    let (merged, decision) = merge_account_with_decision(None, new.clone());
    assert_eq!(merged, new);
    assert_eq!(decision, MergeDecision::NoValidPrevious);
}

#[test]
fn invalid_new_with_invalid_old_keeps_new() {
    let mut old = failed_youtube();
    old.base.display_name = "stale".to_string();
    let new = failed_youtube();
    let (merged, decision) = merge_account_with_decision(Some(&old), new.clone());
    assert_eq!(merged, new);
    assert_eq!(decision, MergeDecision::NoValidPrevious);
}

#[test]
fn valid_new_with_missing_icon_takes_old_icon_only() {
    let old = youtube(1000, ICON);
    let mut new = youtube(1200, "");
    new.base.display_name = "X renamed".to_string();

    let (merged, decision) = merge_account_with_decision(Some(&old), new.clone());
    assert_eq!(decision, MergeDecision::IconCarried);
    assert_eq!(merged.base.follower_count, 1200);
    assert_eq!(merged.base.display_name, "X renamed");
    assert_eq!(merged.base.icon_base64, old.base.icon_base64);
    assert_eq!(merged.base.icon_url, old.base.icon_url);

    let mut expected = new;
    expected.base.icon_base64.clone_from(&old.base.icon_base64);
    expected.base.icon_url.clone_from(&old.base.icon_url);
    assert_eq!(merged, expected);
}

#[test]
fn icon_url_is_not_overwritten_with_encoded_icon() {
    let old = youtube(1000, ICON);
    let merged = merge_account(Some(&old), youtube(1200, ""));
    assert_ne!(merged.base.icon_url, ICON);
}

#[test]
fn valid_new_with_icon_ignores_old_entirely() {
    let old = youtube(1000, "data:image/png;base64,old");
    let new = youtube(1200, "data:image/png;base64,new");
    let (merged, decision) = merge_account_with_decision(Some(&old), new.clone());
    assert_eq!(merged, new);
    assert_eq!(decision, MergeDecision::Accepted);
}

#[test]
fn valid_new_can_lower_a_count() {
    let old = youtube(1000, ICON);
    let new = youtube(900, ICON);
    assert_eq!(merge_account(Some(&old), new).base.follower_count, 900);
}

#[test]
fn old_icon_is_carried_even_when_old_was_invalid() {
    let mut old = failed_youtube();
    old.base.icon_base64 = ICON.to_string();
    let merged = merge_account(Some(&old), youtube(5, ""));
    assert_eq!(merged.base.icon_base64, ICON);
    assert_eq!(merged.base.follower_count, 5);
}

#[test]
fn strict_platform_partial_reading_falls_back() {
    let mut old = AccountStats::unretrieved(Platform::Twitter, "rustlang");
    old.base.time_retrieved = 1;
    old.base.link = "https://twitter.com/rustlang".to_string();
    old.base.follower_count = 100;
    old.base.following_count = 10;
    old.detail = PlatformDetail::Twitter(TwitterDetail { total_tweets: 50 });

    // follower count came through but tweets did not
    let mut new = old.clone();
    new.base.follower_count = 120;
    new.detail = PlatformDetail::Twitter(TwitterDetail { total_tweets: -1 });

    assert_eq!(merge_account(Some(&old), new), old);
}

//! Strategy escalation for a single account.

use vanity_core::{now_millis, validate, AccountStats, Platform};

use super::origin::resolve_asset_url;
use super::ScrapeClient;
use crate::platforms::{page_url, parse_profile};
use crate::strategy::RetryPolicy;

impl ScrapeClient {
    /// Scrapes one account, walking `policy.strategies` in order.
    ///
    /// The avatar is fetched before validation, since some platforms
    /// require an encoded icon. A fetched page whose record fails the validity checker moves on to
    /// the next strategy. When no strategy produces a valid record, the
    /// first parsed record is returned as-is; when no page could be fetched
    /// at all, the result is [`AccountStats::unretrieved`] for `username`.
    /// This never fails: the merge step decides what to do with a weak
    /// reading.
    pub async fn scrape_account(
        &self,
        platform: Platform,
        username: &str,
        policy: &RetryPolicy,
        fetch_icons: bool,
    ) -> AccountStats {
        let mut best_effort: Option<AccountStats> = None;

        for strategy in &policy.strategies {
            let url = page_url(platform, username, strategy.base_url());
            let html = match self
                .fetch_page(&url, strategy, policy.max_retries, policy.backoff_base_secs)
                .await
            {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(
                        platform = %platform,
                        username,
                        strategy = %strategy,
                        error = %e,
                        "profile fetch failed"
                    );
                    continue;
                }
            };

            let mut stats = parse_profile(platform, &html, username);
            stats.base.time_retrieved = now_millis();
            stats.base.icon_url = resolve_asset_url(&url, &stats.base.icon_url);
            let stats = self.with_icon(stats, fetch_icons).await;

            let issues = validate(&stats);
            if issues.is_empty() {
                tracing::debug!(platform = %platform, username, strategy = %strategy, "profile scraped");
                return stats;
            }

            tracing::warn!(
                platform = %platform,
                username,
                strategy = %strategy,
                issues = issues.len(),
                "scraped profile failed validity, escalating"
            );
            if best_effort.is_none() {
                best_effort = Some(stats);
            }
        }

        if let Some(stats) = best_effort {
            return stats;
        }
        tracing::warn!(
            platform = %platform,
            username,
            "every fetch strategy failed, recording unretrieved"
        );
        AccountStats::unretrieved(platform, username)
    }

    async fn with_icon(&self, mut stats: AccountStats, fetch_icons: bool) -> AccountStats {
        if fetch_icons && !stats.base.icon_url.is_empty() {
            stats.base.icon_base64 = self.fetch_icon_base64(&stats.base.icon_url).await;
        }
        stats
    }
}

//! HTTP client for public profile pages.

mod icon;
mod origin;
mod scrape;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use vanity_core::AppConfig;

use crate::error::ScraperError;
use crate::rate_limit::{jittered_delay, retry_with_backoff};
use crate::strategy::FetchStrategy;

pub use icon::encode_data_url;

pub(super) const BROWSER_FALLBACK_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Serial HTTP client for profile pages and avatars.
///
/// Every request after the first waits a jittered inter-request delay, so a
/// collection run never hammers one platform. Requests are not issued
/// concurrently.
pub struct ScrapeClient {
    pub(super) client: Client,
    inter_request_delay_ms: u64,
    has_requested: AtomicBool,
}

impl ScrapeClient {
    /// Creates a client with the given timeout, default `User-Agent`, and
    /// pacing delay.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        inter_request_delay_ms: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            inter_request_delay_ms,
            has_requested: AtomicBool::new(false),
        })
    }

    /// # Errors
    ///
    /// See [`ScrapeClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_inter_request_delay_ms,
        )
    }

    /// Sleeps the jittered inter-request delay, except before the very
    /// first request this client makes.
    pub(super) async fn pace(&self) {
        if self.has_requested.swap(true, Ordering::SeqCst) {
            let delay = jittered_delay(self.inter_request_delay_ms);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Fetches one page as text using `strategy`'s request profile,
    /// retrying transient errors with exponential backoff.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    pub async fn fetch_page(
        &self,
        url: &str,
        strategy: &FetchStrategy,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<String, ScraperError> {
        retry_with_backoff(max_retries, backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                self.pace().await;
                let mut request = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9");

                if *strategy == FetchStrategy::BrowserProfile {
                    request = request
                        .header(reqwest::header::USER_AGENT, BROWSER_FALLBACK_UA)
                        .header(reqwest::header::CACHE_CONTROL, "no-cache")
                        .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1");
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);

                    return Err(ScraperError::RateLimited {
                        domain: origin::extract_domain(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}

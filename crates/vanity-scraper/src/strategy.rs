//! How a profile page is requested, and in what order to try alternatives.

use vanity_core::{AppConfig, Platform};

/// One way of requesting a profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    /// The platform's own host with the configured user agent.
    Direct,
    /// The platform's own host with a desktop-browser user agent and
    /// browser-like headers, for hosts that filter scraper traffic.
    BrowserProfile,
    /// An alternate front end serving the same paths, such as a Nitter
    /// instance for Twitter.
    Mirror { base_url: String },
}

impl FetchStrategy {
    /// Origin override passed to [`crate::platforms::page_url`].
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        match self {
            FetchStrategy::Mirror { base_url } => Some(base_url),
            FetchStrategy::Direct | FetchStrategy::BrowserProfile => None,
        }
    }
}

impl std::fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStrategy::Direct => write!(f, "direct"),
            FetchStrategy::BrowserProfile => write!(f, "browser-profile"),
            FetchStrategy::Mirror { base_url } => write!(f, "mirror({base_url})"),
        }
    }
}

/// Ordered strategies plus the transient-error retry budget applied within
/// each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub strategies: Vec<FetchStrategy>,
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl RetryPolicy {
    /// The default escalation for `platform`.
    ///
    /// Twitter's own pages need a logged-in session, so it goes to the
    /// configured Nitter mirror first. Everything else starts direct and
    /// escalates to a browser profile.
    #[must_use]
    pub fn for_platform(platform: Platform, config: &AppConfig) -> Self {
        let strategies = match platform {
            Platform::Twitter if !config.nitter_url.is_empty() => vec![
                FetchStrategy::Mirror {
                    base_url: config.nitter_url.clone(),
                },
                FetchStrategy::BrowserProfile,
            ],
            _ => vec![FetchStrategy::Direct, FetchStrategy::BrowserProfile],
        };
        Self {
            strategies,
            max_retries: config.scraper_max_retries,
            backoff_base_secs: config.scraper_retry_backoff_base_secs,
        }
    }

    /// A single-strategy policy with no backoff. Mostly useful in tests.
    #[must_use]
    pub fn single(strategy: FetchStrategy) -> Self {
        Self {
            strategies: vec![strategy],
            max_retries: 0,
            backoff_base_secs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        vanity_core::build_app_config(|key| {
            map.get(key)
                .cloned()
                .ok_or(std::env::VarError::NotPresent)
        })
        .unwrap()
    }

    #[test]
    fn twitter_goes_through_nitter_first() {
        let cfg = config(&[("VANITY_NITTER_URL", "https://nitter.example/")]);
        let policy = RetryPolicy::for_platform(Platform::Twitter, &cfg);
        assert_eq!(
            policy.strategies,
            vec![
                FetchStrategy::Mirror {
                    base_url: "https://nitter.example".to_string()
                },
                FetchStrategy::BrowserProfile,
            ]
        );
    }

    #[test]
    fn twitter_without_mirror_goes_direct() {
        let cfg = config(&[("VANITY_NITTER_URL", "")]);
        let policy = RetryPolicy::for_platform(Platform::Twitter, &cfg);
        assert_eq!(policy.strategies[0], FetchStrategy::Direct);
    }

    #[test]
    fn other_platforms_escalate_to_browser_profile() {
        let cfg = config(&[
            ("VANITY_SCRAPER_MAX_RETRIES", "4"),
            ("VANITY_SCRAPER_RETRY_BACKOFF_BASE_SECS", "1"),
        ]);
        let policy = RetryPolicy::for_platform(Platform::Instagram, &cfg);
        assert_eq!(
            policy,
            RetryPolicy {
                strategies: vec![FetchStrategy::Direct, FetchStrategy::BrowserProfile],
                max_retries: 4,
                backoff_base_secs: 1,
            }
        );
    }
}

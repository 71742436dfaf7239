use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "VANITY_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.profiles_path, Path::new("./config/profiles.yaml"));
    assert_eq!(cfg.output_dir, Path::new("./stats"));
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_user_agent, "vanity/0.1 (public-stats)");
    assert_eq!(cfg.scraper_inter_request_delay_ms, 1500);
    assert_eq!(cfg.scraper_max_retries, 2);
    assert_eq!(cfg.scraper_retry_backoff_base_secs, 2);
    assert_eq!(cfg.nitter_url, "https://nitter.net");
    assert!(cfg.fetch_icons);
}

#[test]
fn build_app_config_rejects_unknown_env() {
    let mut map = HashMap::new();
    map.insert("VANITY_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VANITY_ENV"),
        "expected InvalidEnvVar(VANITY_ENV), got: {result:?}"
    );
}

#[test]
fn output_dir_override() {
    let mut map = HashMap::new();
    map.insert("VANITY_OUTPUT_DIR", "/var/lib/vanity");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output_dir, Path::new("/var/lib/vanity"));
}

#[test]
fn scraper_request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("VANITY_SCRAPER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VANITY_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(VANITY_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn scraper_inter_request_delay_ms_override() {
    let mut map = HashMap::new();
    map.insert("VANITY_SCRAPER_INTER_REQUEST_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_inter_request_delay_ms, 0);
}

#[test]
fn scraper_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("VANITY_SCRAPER_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VANITY_SCRAPER_MAX_RETRIES"),
        "expected InvalidEnvVar(VANITY_SCRAPER_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn scraper_retry_backoff_base_secs_override() {
    let mut map = HashMap::new();
    map.insert("VANITY_SCRAPER_RETRY_BACKOFF_BASE_SECS", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_retry_backoff_base_secs, 10);
}

#[test]
fn nitter_url_trailing_slash_is_trimmed() {
    let mut map = HashMap::new();
    map.insert("VANITY_NITTER_URL", "https://nitter.example.org/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.nitter_url, "https://nitter.example.org");
}

#[test]
fn fetch_icons_accepts_common_booleans() {
    for (raw, expected) in [("false", false), ("0", false), ("YES", true), ("on", true)] {
        let mut map = HashMap::new();
        map.insert("VANITY_FETCH_ICONS", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.fetch_icons, expected, "VANITY_FETCH_ICONS={raw}");
    }
}

#[test]
fn fetch_icons_invalid() {
    let mut map = HashMap::new();
    map.insert("VANITY_FETCH_ICONS", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VANITY_FETCH_ICONS"),
        "expected InvalidEnvVar(VANITY_FETCH_ICONS), got: {result:?}"
    );
}

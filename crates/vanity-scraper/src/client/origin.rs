//! URL helpers for the scrape client.

/// Hostname of `url` for error messages, or the whole string when it does
/// not parse.
pub(super) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

/// Resolves an extracted asset reference against the page it came from.
///
/// Absolute URLs pass through; protocol-relative and path-relative
/// references are joined onto `page_url`. An empty reference stays empty.
pub(super) fn resolve_asset_url(page_url: &str, reference: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }
    reqwest::Url::parse(page_url)
        .and_then(|base| base.join(reference))
        .map_or_else(
            |e| {
                tracing::debug!(page_url, reference, error = %e, "could not resolve asset URL");
                reference.to_owned()
            },
            |u| u.to_string(),
        )
}

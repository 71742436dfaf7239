//! Avatar download and data-URL encoding.

use base64::Engine as _;

use super::ScrapeClient;

const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Encodes image bytes as `data:<content-type>;base64,<payload>`.
///
/// Parameters on the content type (`; charset=...`) are dropped; a missing
/// or blank type falls back to `image/png`.
#[must_use]
pub fn encode_data_url(content_type: Option<&str>, bytes: &[u8]) -> String {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

impl ScrapeClient {
    /// Downloads the avatar at `url` and returns it as a data URL.
    ///
    /// Never fails: an empty `url`, a transport error, or a non-2xx status
    /// yields an empty string, which the merge step treats as "no icon".
    pub async fn fetch_icon_base64(&self, url: &str) -> String {
        if url.is_empty() {
            return String::new();
        }
        self.pace().await;

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(url, error = %e, "icon fetch failed");
                return String::new();
            }
        };
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "icon fetch returned non-success status");
            return String::new();
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => encode_data_url(content_type.as_deref(), &bytes),
            Ok(_) => {
                tracing::warn!(url, "icon response body was empty");
                String::new()
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "icon body could not be read");
                String::new()
            }
        }
    }
}

//! HTTP client wrapper for fetching listing pages.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, SUPPORTED_CHARSETS};
use super::{FetchError, PageFetcher};
use crate::user_agent;

/// Inline style attributes carry no data and bloat the extracted cell text.
#[allow(clippy::expect_used)]
static STYLE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"style="[^"]*""#).expect("style regex is valid") // Static pattern, safe to panic
});

/// HTTP page fetcher backed by a pooled `reqwest` client.
///
/// Create once and share (it is cheap to clone) so every page task reuses
/// the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a fetcher with explicit connect and total timeouts in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built.
    #[instrument(level = "debug")]
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .user_agent(user_agent::default_listing_user_agent())
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let clean_url = clean_url(url);
        let parsed =
            Url::parse(&clean_url).map_err(|e| FetchError::invalid_url(&clean_url, e.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .header(ACCEPT_LANGUAGE, user_agent::ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| FetchError::network(&clean_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(&clean_url, status.as_u16()));
        }

        if let Some(charset) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(declared_charset)
            && !SUPPORTED_CHARSETS.contains(&charset.as_str())
        {
            return Err(FetchError::unsupported_encoding(&clean_url, charset));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::body(&clean_url, e))?;

        debug!(bytes = body.len(), "page fetched");
        Ok(strip_styles(&body))
    }
}

/// Removes line breaks pasted along with the URL.
fn clean_url(url: &str) -> String {
    url.trim().replace(['\r', '\n'], "")
}

/// Extracts the lowercased `charset` parameter of a `Content-Type` value.
fn declared_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').to_ascii_lowercase();
        (!value.is_empty()).then_some(value)
    })
}

fn strip_styles(html: &str) -> String {
    STYLE_ATTRIBUTE.replace_all(html, "").into_owned()
}

//! `FeedClient` - HTTP retrieval of compressed XMLTV feeds.

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::Client;
use tracing::instrument;
use url::Url;

use epgmerge_core::{EpgError, EpgResult, FeedSource};

use crate::fetch::LocalFeedFetch;

/// Maximum number of retries per feed request.
const MAX_RETRIES: u32 = 3;

/// Default delay between retries.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Leading bytes of a gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// HTTP client for compressed XMLTV feeds.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FeedClient {
    /// HTTP client (reqwest, transport gzip enabled).
    http_client: Client,
    /// Delay between retries.
    retry_delay: Duration,
}

/// Builder for `FeedClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FeedClientBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
    retry_delay: Option<Duration>,
}

impl FeedClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            user_agent: None,
            timeout: None,
            retry_delay: None,
        }
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the delay between retries (default: 2s).
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`EpgError::FeedUnavailable`] if `user_agent` is not set or
    /// `reqwest::Client` fails to build.
    pub fn build(self) -> EpgResult<FeedClient> {
        let user_agent = self
            .user_agent
            .ok_or_else(|| EpgError::FeedUnavailable(String::from("user_agent is required")))?;

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| EpgError::FeedUnavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(FeedClient {
            http_client,
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
        })
    }
}

/// Rewrites GitHub `blob` URLs to their raw content equivalent.
///
/// Feed lists often carry browser URLs; the raw host serves the actual
/// `.gz` payload.
fn normalize_feed_url(url: &str) -> String {
    if url.contains("github.com") && url.contains("/blob/") {
        url.replace("github.com", "raw.githubusercontent.com")
            .replace("/blob/", "/")
    } else {
        url.to_owned()
    }
}

/// Decompresses the response body when it is a gzip stream, otherwise
/// treats it as plain UTF-8 XML.
fn decode_body(bytes: &[u8]) -> EpgResult<String> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(bytes);
        let mut xml = String::new();
        decoder
            .read_to_string(&mut xml)
            .map_err(|e| EpgError::FeedUnavailable(format!("gzip decompression failed: {e}")))?;
        Ok(xml)
    } else {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| EpgError::FeedUnavailable(format!("feed body is not UTF-8: {e}")))
    }
}

impl FeedClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> FeedClientBuilder {
        FeedClientBuilder::new()
    }

    /// Downloads one URL with retry, returning the decompressed body.
    async fn download(&self, url: &str) -> EpgResult<String> {
        let mut last_err = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = match self.http_client.get(url).send().await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(%url, attempt, error = %e, "Request failed, will retry");
                    last_err = Some(EpgError::FeedUnavailable(format!("request failed: {e}")));
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                tracing::warn!(%url, attempt, code = status.as_u16(), "Non-success status, will retry");
                last_err = Some(EpgError::FeedUnavailable(format!("HTTP {status}")));
                continue;
            }

            let bytes = match response.bytes().await {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(%url, attempt, error = %e, "Failed to read body, will retry");
                    last_err =
                        Some(EpgError::FeedUnavailable(format!("failed to read body: {e}")));
                    continue;
                }
            };

            tracing::debug!(%url, body_len = bytes.len(), "Feed body received");
            return decode_body(&bytes);
        }

        Err(last_err
            .unwrap_or_else(|| EpgError::FeedUnavailable(String::from("failed after retries"))))
    }
}

impl LocalFeedFetch for FeedClient {
    #[instrument(skip_all, fields(source = %source.name))]
    async fn fetch_xml(&self, source: &FeedSource) -> EpgResult<String> {
        let url = Url::parse(&normalize_feed_url(&source.url))
            .map_err(|e| EpgError::FeedUnavailable(format!("invalid feed URL: {e}")))?;
        self.download(url.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    const SAMPLE_XML: &str = "<tv><channel id=\"c1\"><display-name>Test</display-name></channel></tv>";

    fn gzip_bytes(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    fn make_source(url: String) -> FeedSource {
        FeedSource {
            name: String::from("Test Source"),
            url,
            priority: 1,
        }
    }

    fn make_client() -> FeedClient {
        FeedClient::builder()
            .user_agent("epgmerge-test/0.0.0")
            .retry_delay(Duration::from_millis(0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = FeedClient::builder().build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_normalize_rewrites_github_blob_urls() {
        // Arrange & Act
        let url = normalize_feed_url("https://github.com/u/repo/blob/main/epg.xml.gz");

        // Assert
        assert_eq!(
            url,
            "https://raw.githubusercontent.com/u/repo/main/epg.xml.gz"
        );
    }

    #[test]
    fn test_normalize_leaves_other_urls_alone() {
        // Arrange & Act
        let url = normalize_feed_url("https://avkb.short.gy/jioepg.xml.gz");

        // Assert
        assert_eq!(url, "https://avkb.short.gy/jioepg.xml.gz");
    }

    #[test]
    fn test_decode_body_gunzips_gzip_streams() {
        // Arrange
        let compressed = gzip_bytes(SAMPLE_XML);

        // Act
        let xml = decode_body(&compressed).unwrap();

        // Assert
        assert_eq!(xml, SAMPLE_XML);
    }

    #[test]
    fn test_decode_body_passes_plain_xml_through() {
        // Arrange & Act
        let xml = decode_body(SAMPLE_XML.as_bytes()).unwrap();

        // Assert
        assert_eq!(xml, SAMPLE_XML);
    }

    #[test]
    fn test_decode_body_rejects_truncated_gzip() {
        // Arrange
        let mut compressed = gzip_bytes(SAMPLE_XML);
        compressed.truncate(6);

        // Act
        let result = decode_body(&compressed);

        // Assert
        assert!(matches!(result, Err(EpgError::FeedUnavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_xml_via_http_gzip_body() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/epg.xml.gz"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_bytes(gzip_bytes(SAMPLE_XML)),
            )
            .mount(&mock_server)
            .await;

        let client = make_client();
        let source = make_source(format!("{}/epg.xml.gz", mock_server.uri()));

        // Act
        let xml = client.fetch_xml(&source).await.unwrap();

        // Assert
        assert_eq!(xml, SAMPLE_XML);
    }

    #[tokio::test]
    async fn test_fetch_xml_via_http_plain_body() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(SAMPLE_XML))
            .mount(&mock_server)
            .await;

        let client = make_client();
        let source = make_source(format!("{}/epg.xml", mock_server.uri()));

        // Act
        let xml = client.fetch_xml(&source).await.unwrap();

        // Assert
        assert_eq!(xml, SAMPLE_XML);
    }

    #[tokio::test]
    async fn test_fetch_xml_maps_http_error_to_feed_unavailable() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = make_client();
        let source = make_source(format!("{}/missing.xml.gz", mock_server.uri()));

        // Act
        let result = client.fetch_xml(&source).await;

        // Assert
        assert!(matches!(result, Err(EpgError::FeedUnavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_xml_retries_until_success() {
        // Arrange: two failures, then success
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(SAMPLE_XML))
            .mount(&mock_server)
            .await;

        let client = make_client();
        let source = make_source(format!("{}/epg.xml.gz", mock_server.uri()));

        // Act
        let xml = client.fetch_xml(&source).await.unwrap();

        // Assert
        assert_eq!(xml, SAMPLE_XML);
    }

    #[tokio::test]
    async fn test_user_agent_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header("User-Agent", "epgmerge/0.2.1"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(SAMPLE_XML))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FeedClient::builder()
            .user_agent("epgmerge/0.2.1")
            .retry_delay(Duration::from_millis(0))
            .build()
            .unwrap();
        let source = make_source(format!("{}/epg.xml.gz", mock_server.uri()));

        // Act & Assert (mock expect(1) verifies User-Agent header)
        client.fetch_xml(&source).await.unwrap();
    }
}

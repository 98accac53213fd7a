//! HTTP client for the request board
//!
//! One GET per call, no retries and no rate limiting. A non-2xx status is
//! not a failure: the body is returned like a browser `fetch` would, and
//! the extractor simply finds no requests in an error page.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};

use crate::domain::{PageFetcher, SortError, SortResult};
use crate::infrastructure::config::HttpConfig;

/// Maximum redirects followed when redirects are enabled
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> SortResult<Self> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpConfig) -> SortResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(MAX_REDIRECTS)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| SortError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Fetch the body of `url` as text, whatever the status code
    pub async fn fetch_html_string(&self, url: &str) -> SortResult<String> {
        debug!("🌐 HTTP GET: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SortError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ HTTP {} for {}, using the body as is", status, url);
        }

        response
            .text()
            .await
            .map_err(|e| SortError::fetch(url, format!("Failed to read response body: {e}")))
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &str) -> SortResult<String> {
        self.fetch_html_string(url).await
    }
}

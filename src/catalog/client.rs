//! HTTP client for catalog pages using wreq.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info};
use wreq::Client;
use wreq_util::Emulation;

/// Source of catalog page bodies - enables mocking for tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Site root, ending in `/`.
    fn base_url(&self) -> &str;

    /// Fetches catalog page `page` (1-based).
    ///
    /// Returns `None` on any failure: transport error, timeout, or a
    /// non-success status. Failures are logged, never raised.
    async fn fetch_page(&self, page: u32) -> Option<String>;

    /// URL of catalog page `page`.
    fn page_url(&self, page: u32) -> String {
        format!("{}catalogue/page-{}.html", self.base_url(), page)
    }
}

/// Catalog HTTP client with a bounded per-request timeout.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, base_url: crate::config::normalize_base_url(&config.base_url) })
    }

    /// Performs a GET request, failing on any non-2xx status.
    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_page(&self, page: u32) -> Option<String> {
        let url = self.page_url(page);
        info!("Requesting page: {}", url);

        match self.get(&url).await {
            Ok(body) => Some(body),
            Err(e) => {
                error!("Failed to fetch {}: {:#}", url, e);
                None
            }
        }
    }
}

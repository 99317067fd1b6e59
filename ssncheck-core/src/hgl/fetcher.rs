//! HTTP fetcher for the SSA high-group document
//!
//! One outbound GET per refresh cycle at most, with a bounded timeout.
//! Fetch failures are reported to the cache, which keeps serving the
//! previous snapshot.

use reqwest::Client;
use thiserror::Error;

use super::config::HglConfig;

/// Fetches the high-group document from the configured endpoint
pub struct HglFetcher {
    client: Client,
    url: String,
}

impl HglFetcher {
    /// Create a new fetcher from config
    pub fn new(config: &HglConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!(
                "Ssncheck/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Fetch the raw document body
    pub async fn fetch_document(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Get the document URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Errors that can occur while fetching the high-group document
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// Network/request error (includes the fetch timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;

/// Fetch collaborator: wraps one shared HTTP client for the whole
/// pool. `Ok(None)` means "nothing to expand" - a non-success status
/// or a non-HTML content type. Transport failures surface as errors
/// and are caught inside the worker.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Ambit/0.2 (https://github.com/trailhead-dev/ambit)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<Option<String>> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }
        let is_html = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("text/html"))
            .unwrap_or(false);
        if !is_html {
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new(10)
    }
}

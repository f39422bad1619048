use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Thin reqwest wrapper: fixed user agent and timeout, errors on non-2xx
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client })
    }

    /// GET `url` and return the body as text
    pub async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.send_get_request(url).await?;
        Self::check_response_status(&response, url)?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))
    }

    fn check_response_status(response: &reqwest::Response, url: &str) -> Result<()> {
        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} from {}", response.status(), url);
        }
        Ok(())
    }
}

use crate::config::ValidatorConfig;
use crate::error::{CoreError, CoreResult};
use crate::fetch::RemoteFetcher;
use std::time::Duration;

/// Blocking HTTP client with a fixed per-request timeout. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> CoreResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| CoreError::Config(format!("http client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_config(cfg: &ValidatorConfig) -> CoreResult<Self> {
        Self::new(cfg.fetch_timeout(), &cfg.user_agent)
    }
}

impl RemoteFetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> CoreResult<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::RemoteFetchFailed(e.to_string()))?;
        resp.text()
            .map_err(|e| CoreError::RemoteFetchFailed(e.to_string()))
    }
}

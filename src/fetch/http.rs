use crate::config::SyncConfig;
use crate::error::{FetchError, SyncError};
use crate::fetch::{Fetch, FetchResponse};
use reqwest::blocking::Client;

/// [`Fetch`] over a blocking `reqwest` client.
///
/// The client carries the configured User-Agent and the fixed per-request
/// timeout, so every call of a run behaves the same.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher from the run configuration
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(SyncError::Client)?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        ::log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        ::log::trace!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchResponse::new(url, status, body))
    }
}

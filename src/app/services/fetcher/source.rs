//! Snapshot sources for the fetch cycle
//!
//! A source produces the raw compressed bytes of one snapshot. Transport
//! failures, non-success responses and empty bodies are all errors here so
//! the fetcher can abort the cycle before decompression.

use std::future::Future;
use std::path::PathBuf;

use reqwest::Client;
use tracing::debug;

use crate::config::FetchConfig;
use crate::{Error, Result};

/// Anything that can deliver a compressed METAR snapshot
pub trait SnapshotSource: Send + Sync {
    /// Human-readable location for logging
    fn describe(&self) -> String;

    /// Retrieve the compressed snapshot bytes
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Snapshot served over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Build a client with the configured timeout and user agent
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::transport(&config.source_url, e))?;

        Ok(Self {
            client,
            url: config.source_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SnapshotSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::transport(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(&self.url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(&self.url, e))?;

        if body.is_empty() {
            return Err(Error::empty_response(&self.url));
        }

        debug!("Received {} bytes from {}", body.len(), self.url);
        Ok(body.to_vec())
    }
}

/// Snapshot read from a local gzip file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::io(format!("Failed to read {}", self.path.display()), e)
        })?;

        if bytes.is_empty() {
            return Err(Error::empty_response(self.path.display().to_string()));
        }

        Ok(bytes)
    }
}

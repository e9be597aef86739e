use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use statusview_core::error::{Result, StatusError};
use statusview_core::StatusSnapshot;

use super::{SourceFactory, StatusSource};

/// Plain `GET <endpoint>` with no extra headers or auth.
pub struct HttpStatusSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStatusSource {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self) -> Result<StatusSnapshot> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| StatusError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StatusError::HttpStatus(status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| StatusError::Network(format!("read body failed: {e}")))?;

        StatusSnapshot::decode(&body)
    }
}

/// Shares one connection pool across every feed.
#[derive(Clone)]
pub struct HttpSourceFactory {
    client: reqwest::Client,
}

impl HttpSourceFactory {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| StatusError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self { client })
    }
}

impl SourceFactory for HttpSourceFactory {
    fn source_for(&self, endpoint: &str) -> Arc<dyn StatusSource> {
        Arc::new(HttpStatusSource::new(self.client.clone(), endpoint))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ModelError, ModelResult};

/// Raw HTTP outcome of one candidate call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_overloaded(&self) -> bool {
        self.status == 503
    }
}

/// The request never produced an HTTP response.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// POSTs `body` to `url`, passing `api_key` as the `key` query parameter.
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> ModelResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ModelError::Http(error.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ModelTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        // The request URL carries the key; strip it from errors.
        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(body)
            .send()
            .await
            .map_err(|error| TransportError(error.without_url().to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError(error.without_url().to_string()))?;
        Ok(TransportResponse { status, body })
    }
}

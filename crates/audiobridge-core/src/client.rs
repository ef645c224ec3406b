use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{BridgeAddress, BridgeConfig};
use crate::endpoint::BridgeEndpoint;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("timeout")]
    Timeout,
    #[error("connect error: {0}")]
    Connect(String),
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    #[error("request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BridgeError::Timeout
        } else if err.is_connect() {
            BridgeError::Connect(err.to_string())
        } else {
            BridgeError::Request(err.to_string())
        }
    }
}

/// One network round trip per call against a single bridge.
///
/// Implementations must be usable from several adapters at once; every call is a
/// single attempt and nothing is retried.
#[async_trait]
pub trait BridgeClient: Send + Sync {
    /// GET the endpoint. Returns the decoded body only for HTTP 200.
    async fn get(&self, endpoint: BridgeEndpoint) -> Result<Value, BridgeError>;

    /// POST with an optional JSON body and hand back the decoded response body.
    async fn post_for_body(
        &self,
        endpoint: BridgeEndpoint,
        body: Option<Value>,
    ) -> Result<Value, BridgeError>;

    async fn post(&self, endpoint: BridgeEndpoint, body: Option<Value>) -> Result<(), BridgeError> {
        self.post_for_body(endpoint, body).await.map(|_| ())
    }
}

#[derive(Debug, Clone)]
pub struct HttpBridgeClient {
    client: Client,
    address: BridgeAddress,
    timeout: Duration,
}

impl HttpBridgeClient {
    pub fn new(address: BridgeAddress, timeout: Duration) -> Result<Self, BridgeError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, address, timeout))
    }

    pub fn from_config(config: &BridgeConfig) -> Result<Self, BridgeError> {
        Self::new(config.address.clone(), config.request_timeout)
    }

    /// Reuse an existing connection pool.
    pub fn with_client(client: Client, address: BridgeAddress, timeout: Duration) -> Self {
        Self {
            client,
            address,
            timeout,
        }
    }

    pub fn address(&self) -> &BridgeAddress {
        &self.address
    }

    fn url(&self, endpoint: BridgeEndpoint) -> String {
        format!("{}{}", self.address.base_url(), endpoint.path())
    }

    async fn send(&self, request: RequestBuilder, endpoint: BridgeEndpoint) -> Result<Value, BridgeError> {
        let response = request.timeout(self.timeout).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            debug!(%endpoint, status = status.as_u16(), "bridge rejected request");
            return Err(BridgeError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(decode_body(endpoint, &bytes))
    }
}

/// An undecodable 200 body carries no usable fields; it maps to `Null` so the
/// mapper falls back to its defaults.
pub(crate) fn decode_body(endpoint: BridgeEndpoint, bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) => {
            warn!(%endpoint, error = %err, "malformed payload from bridge");
            Value::Null
        }
    }
}

#[async_trait]
impl BridgeClient for HttpBridgeClient {
    async fn get(&self, endpoint: BridgeEndpoint) -> Result<Value, BridgeError> {
        debug!(%endpoint, bridge = %self.address, "fetch");
        self.send(self.client.get(self.url(endpoint)), endpoint).await
    }

    async fn post_for_body(
        &self,
        endpoint: BridgeEndpoint,
        body: Option<Value>,
    ) -> Result<Value, BridgeError> {
        debug!(%endpoint, bridge = %self.address, "post");
        let mut request = self.client.post(self.url(endpoint));
        if let Some(body) = body.as_ref() {
            request = request.json(body);
        }
        self.send(request, endpoint).await
    }
}

//! Setup-time connectivity validation. The only place bridge errors reach the
//! operator directly.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{info, warn};

use crate::client::{BridgeClient, BridgeError, HttpBridgeClient};
use crate::config::BridgeConfig;
use crate::endpoint::BridgeEndpoint;
use crate::mapper::{map_status, StatusSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("cannot connect to bridge")]
    CannotConnect,
    #[error("bridge did not answer in time")]
    Timeout,
    #[error("bridge already configured")]
    AlreadyConfigured,
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl SetupError {
    /// Form error key shown to the operator.
    pub fn code(&self) -> &'static str {
        match self {
            SetupError::CannotConnect => "cannot_connect",
            SetupError::Timeout => "timeout",
            SetupError::AlreadyConfigured => "already_configured",
            SetupError::Unknown(_) => "unknown",
        }
    }
}

impl From<BridgeError> for SetupError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Timeout => SetupError::Timeout,
            BridgeError::Connect(_) | BridgeError::HttpStatus(_) | BridgeError::Request(_) => {
                SetupError::CannotConnect
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedBridge {
    pub unique_id: String,
    pub title: String,
    pub status: StatusSnapshot,
}

/// Requires HTTP 200 from the status endpoint within the client's timeout.
pub async fn validate<C: BridgeClient>(client: &C, config: &BridgeConfig) -> Result<ValidatedBridge, SetupError> {
    let json = client.get(BridgeEndpoint::Status).await.map_err(|err| {
        warn!(bridge = %config.address, error = %err, "bridge validation failed");
        SetupError::from(err)
    })?;

    Ok(ValidatedBridge {
        unique_id: config.address.identity(),
        title: config.name.clone(),
        status: map_status(&json),
    })
}

/// Builds the HTTP client for `config` and validates it.
pub async fn validate_address(config: &BridgeConfig) -> Result<ValidatedBridge, SetupError> {
    let client = HttpBridgeClient::from_config(config).map_err(|err| SetupError::Unknown(err.to_string()))?;
    validate(&client, config).await
}

/// Bridges already set up, keyed by `{host}_{port}`.
#[derive(Debug, Default)]
pub struct ConfiguredBridges {
    ids: HashSet<String>,
}

impl ConfiguredBridges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, unique_id: &str) -> bool {
        self.ids.contains(unique_id)
    }

    /// Validates and records a bridge, refusing a second entry for the same address.
    pub async fn configure<C: BridgeClient>(
        &mut self,
        client: &C,
        config: &BridgeConfig,
    ) -> Result<ValidatedBridge, SetupError> {
        let validated = validate(client, config).await?;
        if !self.ids.insert(validated.unique_id.clone()) {
            return Err(SetupError::AlreadyConfigured);
        }
        info!(bridge = %config.address, title = %validated.title, "bridge configured");
        Ok(validated)
    }

    pub fn remove(&mut self, unique_id: &str) -> bool {
        self.ids.remove(unique_id)
    }
}

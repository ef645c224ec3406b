use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_NAME: &str = "macOS Audio Bridge";

/// Location of one remote bridge. Fixed for the lifetime of a configured instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BridgeAddress {
    pub host: String,
    pub port: u16,
}

impl BridgeAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Stable `{host}_{port}` key used for device identity and duplicate detection.
    pub fn identity(&self) -> String {
        format!("{}_{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for BridgeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub address: BridgeAddress,
    pub name: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub volume_step: u8,
}

impl BridgeConfig {
    pub fn new(address: BridgeAddress) -> Self {
        Self {
            address,
            name: DEFAULT_NAME.to_string(),
            request_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_secs(10),
            volume_step: 10,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

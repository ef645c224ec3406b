use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::BridgeError;

/// Outcome of an adapter's most recent network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub last_ok_ts: Option<DateTime<Utc>>,
    pub last_failure: Option<String>,
    pub reads_ok: u64,
    pub reads_err: u64,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            available: true,
            last_ok_ts: None,
            last_failure: None,
            reads_ok: 0,
            reads_err: 0,
        }
    }
}

impl Availability {
    pub fn mark_ok(&mut self) {
        self.available = true;
        self.reads_ok += 1;
        self.last_ok_ts = Some(Utc::now());
        self.last_failure = None;
    }

    pub fn mark_failed(&mut self, entity: &str, err: &BridgeError) {
        if self.available {
            warn!(entity, error = %err, "bridge unavailable");
        } else {
            debug!(entity, error = %err, "bridge still unavailable");
        }
        self.available = false;
        self.reads_err += 1;
        self.last_failure = Some(err.to_string());
    }

    /// Folds a call result into the flag, handing back the value on success.
    pub fn track<T>(&mut self, entity: &str, result: Result<T, BridgeError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.mark_ok();
                Some(value)
            }
            Err(err) => {
                self.mark_failed(entity, &err);
                None
            }
        }
    }
}

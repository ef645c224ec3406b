use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{BridgeClient, BridgeError};
use crate::endpoint::BridgeEndpoint;

/// In-memory bridge answering from a per-endpoint script. Unscripted endpoints
/// answer 404.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    responses: Mutex<HashMap<BridgeEndpoint, Result<Value, BridgeError>>>,
    calls: Mutex<Vec<(BridgeEndpoint, Option<Value>)>>,
}

impl ScriptedClient {
    pub fn respond(&self, endpoint: BridgeEndpoint, response: Result<Value, BridgeError>) {
        self.responses
            .lock()
            .expect("responses lock")
            .insert(endpoint, response);
    }

    pub fn calls(&self) -> Vec<(BridgeEndpoint, Option<Value>)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn last_body(&self, endpoint: BridgeEndpoint) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|(ep, _)| *ep == endpoint)
            .and_then(|(_, body)| body)
    }

    fn answer(&self, endpoint: BridgeEndpoint, body: Option<Value>) -> Result<Value, BridgeError> {
        self.calls.lock().expect("calls lock").push((endpoint, body));
        self.responses
            .lock()
            .expect("responses lock")
            .get(&endpoint)
            .cloned()
            .unwrap_or(Err(BridgeError::HttpStatus(404)))
    }
}

#[async_trait]
impl BridgeClient for ScriptedClient {
    async fn get(&self, endpoint: BridgeEndpoint) -> Result<Value, BridgeError> {
        self.answer(endpoint, None)
    }

    async fn post_for_body(
        &self,
        endpoint: BridgeEndpoint,
        body: Option<Value>,
    ) -> Result<Value, BridgeError> {
        self.answer(endpoint, body)
    }
}

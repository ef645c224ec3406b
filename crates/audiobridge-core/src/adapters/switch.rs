use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use super::{Entity, EntityIdentity, EntityKind};
use crate::availability::Availability;
use crate::client::{BridgeClient, BridgeError};
use crate::endpoint::BridgeEndpoint;
use crate::mapper::map_media_info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    Shuffle,
    Repeat,
}

impl SwitchKind {
    pub fn key(self) -> &'static str {
        match self {
            SwitchKind::Shuffle => "shuffle",
            SwitchKind::Repeat => "repeat",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SwitchKind::Shuffle => "Shuffle",
            SwitchKind::Repeat => "Repeat",
        }
    }

    fn endpoint(self) -> BridgeEndpoint {
        match self {
            SwitchKind::Shuffle => BridgeEndpoint::SetShuffle,
            SwitchKind::Repeat => BridgeEndpoint::SetRepeat,
        }
    }

    fn payload(self, on: bool) -> Value {
        match self {
            SwitchKind::Shuffle => json!({ "enabled": on }),
            SwitchKind::Repeat => json!({ "mode": if on { "all" } else { "off" } }),
        }
    }
}

pub struct ToggleSwitch<C: BridgeClient> {
    client: Arc<C>,
    identity: EntityIdentity,
    kind: SwitchKind,
    is_on: bool,
    availability: Availability,
}

impl<C: BridgeClient> ToggleSwitch<C> {
    pub fn new(
        client: Arc<C>,
        bridge_id: impl Into<String>,
        bridge_name: impl Into<String>,
        kind: SwitchKind,
    ) -> Self {
        Self {
            client,
            identity: EntityIdentity::new(bridge_id, bridge_name),
            kind,
            is_on: false,
            availability: Availability::default(),
        }
    }

    pub fn kind(&self) -> SwitchKind {
        self.kind
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub async fn turn_on(&mut self) -> Result<(), BridgeError> {
        self.set(true).await
    }

    pub async fn turn_off(&mut self) -> Result<(), BridgeError> {
        self.set(false).await
    }

    async fn set(&mut self, on: bool) -> Result<(), BridgeError> {
        let endpoint = self.kind.endpoint();
        match self.client.post(endpoint, Some(self.kind.payload(on))).await {
            Ok(()) => {
                self.availability.mark_ok();
                self.is_on = on;
                Ok(())
            }
            Err(err) => {
                warn!(entity = self.kind.key(), %endpoint, error = %err, "switch command failed");
                self.availability.mark_failed(self.kind.key(), &err);
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<C: BridgeClient> Entity for ToggleSwitch<C> {
    fn kind(&self) -> EntityKind {
        EntityKind::Switch
    }

    fn unique_id(&self) -> String {
        self.identity.unique_id(self.kind.key())
    }

    fn name(&self) -> String {
        self.identity.display_name(self.kind.label())
    }

    fn icon(&self) -> &'static str {
        match self.kind {
            SwitchKind::Shuffle => "mdi:shuffle",
            SwitchKind::Repeat => "mdi:repeat",
        }
    }

    fn availability(&self) -> &Availability {
        &self.availability
    }

    fn state(&self) -> Value {
        json!({ "is_on": self.is_on })
    }

    async fn refresh(&mut self) {
        let result = self.client.get(BridgeEndpoint::MediaInfo).await;
        if let Some(json) = self.availability.track(self.kind.key(), result) {
            let info = map_media_info(&json);
            self.is_on = match self.kind {
                SwitchKind::Shuffle => info.shuffle,
                SwitchKind::Repeat => info.repeat.is_enabled(),
            };
        }
    }
}

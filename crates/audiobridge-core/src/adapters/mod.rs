//! Entity adapters: one per capability exposed to the host platform.
//!
//! Each adapter owns its snapshot and shares the bridge client through an
//! `Arc`. A failed refresh flips availability and keeps the last known values.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::availability::Availability;

mod media_player;
mod select;
mod sensor;
mod switch;

pub use media_player::{MediaPlayer, PlayerFeature, PlayerState};
pub use select::{DeviceDirection, DeviceSelect};
pub use sensor::{MetadataSensor, SensorKind};
pub use switch::{SwitchKind, ToggleSwitch};

/// Platform entity type an adapter is exposed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    MediaPlayer,
    Select,
    Sensor,
    Switch,
}

#[async_trait]
pub trait Entity: Send {
    fn kind(&self) -> EntityKind;
    fn unique_id(&self) -> String;
    fn name(&self) -> String;
    fn icon(&self) -> &'static str;
    fn availability(&self) -> &Availability;

    /// Current attributes as presented to the host.
    fn state(&self) -> Value;

    /// One poll cycle. Never fails; errors land in `availability()`.
    async fn refresh(&mut self);

    fn available(&self) -> bool {
        self.availability().available
    }
}

/// Naming shared by every adapter of one bridge.
#[derive(Debug, Clone)]
pub(crate) struct EntityIdentity {
    pub bridge_id: String,
    pub bridge_name: String,
}

impl EntityIdentity {
    pub fn new(bridge_id: impl Into<String>, bridge_name: impl Into<String>) -> Self {
        Self {
            bridge_id: bridge_id.into(),
            bridge_name: bridge_name.into(),
        }
    }

    pub fn unique_id(&self, key: &str) -> String {
        format!("{}_{key}", self.bridge_id)
    }

    pub fn display_name(&self, label: &str) -> String {
        format!("{} {label}", self.bridge_name)
    }
}

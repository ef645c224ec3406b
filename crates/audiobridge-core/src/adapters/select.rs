use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use super::{Entity, EntityIdentity, EntityKind};
use crate::availability::Availability;
use crate::client::{BridgeClient, BridgeError};
use crate::endpoint::BridgeEndpoint;
use crate::mapper::{map_current_device, map_devices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceDirection {
    Output,
    Input,
}

impl DeviceDirection {
    fn key(self) -> &'static str {
        match self {
            DeviceDirection::Output => "output_device_select",
            DeviceDirection::Input => "input_device_select",
        }
    }

    fn label(self) -> &'static str {
        match self {
            DeviceDirection::Output => "Output Device",
            DeviceDirection::Input => "Input Device",
        }
    }

    fn current_endpoint(self) -> BridgeEndpoint {
        match self {
            DeviceDirection::Output => BridgeEndpoint::OutputDevice,
            DeviceDirection::Input => BridgeEndpoint::InputDevice,
        }
    }

    fn set_endpoint(self) -> BridgeEndpoint {
        match self {
            DeviceDirection::Output => BridgeEndpoint::SetOutputDevice,
            DeviceDirection::Input => BridgeEndpoint::SetInputDevice,
        }
    }
}

/// Picks the bridge's default output or input device.
pub struct DeviceSelect<C: BridgeClient> {
    client: Arc<C>,
    identity: EntityIdentity,
    direction: DeviceDirection,
    options: Vec<String>,
    current: Option<String>,
    availability: Availability,
}

impl<C: BridgeClient> DeviceSelect<C> {
    pub fn new(
        client: Arc<C>,
        bridge_id: impl Into<String>,
        bridge_name: impl Into<String>,
        direction: DeviceDirection,
    ) -> Self {
        Self {
            client,
            identity: EntityIdentity::new(bridge_id, bridge_name),
            direction,
            options: Vec::new(),
            current: None,
            availability: Availability::default(),
        }
    }

    pub fn direction(&self) -> DeviceDirection {
        self.direction
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn current_option(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Switches device. The name is sent as given, without checking it against
    /// the last fetched options.
    pub async fn select_option(&mut self, option: &str) -> Result<(), BridgeError> {
        let endpoint = self.direction.set_endpoint();
        let result = self
            .client
            .post(endpoint, Some(json!({ "name": option })))
            .await;

        match result {
            Ok(()) => {
                self.availability.mark_ok();
                self.current = Some(option.to_string());
                Ok(())
            }
            Err(err) => {
                warn!(entity = self.direction.key(), %endpoint, error = %err, "device switch failed");
                self.availability.mark_failed(self.direction.key(), &err);
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<C: BridgeClient> Entity for DeviceSelect<C> {
    fn kind(&self) -> EntityKind {
        EntityKind::Select
    }

    fn unique_id(&self) -> String {
        self.identity.unique_id(self.direction.key())
    }

    fn name(&self) -> String {
        self.identity.display_name(self.direction.label())
    }

    fn icon(&self) -> &'static str {
        match self.direction {
            DeviceDirection::Output => "mdi:speaker",
            DeviceDirection::Input => "mdi:microphone",
        }
    }

    fn availability(&self) -> &Availability {
        &self.availability
    }

    fn state(&self) -> Value {
        json!({
            "options": self.options,
            "current_option": self.current,
        })
    }

    async fn refresh(&mut self) {
        let key = self.direction.key();

        let result = self.client.get(BridgeEndpoint::AudioDevices).await;
        let Some(devices) = self.availability.track(key, result) else {
            return;
        };
        let result = self.client.get(self.direction.current_endpoint()).await;
        let Some(current) = self.availability.track(key, result) else {
            return;
        };

        // Both polls landed; options and current never mix two cycles.
        self.options = map_devices(&devices, self.direction == DeviceDirection::Output);
        self.current = map_current_device(&current);
    }
}

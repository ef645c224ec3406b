use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;

use crate::adapters::{
    DeviceDirection, DeviceSelect, Entity, EntityKind, MediaPlayer, MetadataSensor, SensorKind, SwitchKind,
    ToggleSwitch,
};
use crate::availability::Availability;
use crate::client::BridgeClient;
use crate::config::BridgeConfig;

/// Every adapter for one configured bridge, sharing a single client.
pub struct BridgeHub<C: BridgeClient> {
    config: BridgeConfig,
    client: Arc<C>,
    pub media_player: MediaPlayer<C>,
    pub output_select: DeviceSelect<C>,
    pub input_select: DeviceSelect<C>,
    pub sensors: Vec<MetadataSensor<C>>,
    pub shuffle: ToggleSwitch<C>,
    pub repeat: ToggleSwitch<C>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BridgeReport {
    pub ts: DateTime<Utc>,
    pub bridge_id: String,
    pub name: String,
    pub entities: Vec<EntityReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub kind: EntityKind,
    pub unique_id: String,
    pub name: String,
    pub icon: &'static str,
    pub availability: Availability,
    pub state: Value,
}

impl<C: BridgeClient> BridgeHub<C> {
    pub fn new(config: BridgeConfig, client: Arc<C>) -> Self {
        let id = config.address.identity();
        let name = config.name.clone();

        let sensors = SensorKind::ALL
            .iter()
            .map(|kind| MetadataSensor::new(client.clone(), id.clone(), name.clone(), *kind))
            .collect();

        Self {
            media_player: MediaPlayer::new(client.clone(), id.clone(), name.clone(), config.volume_step),
            output_select: DeviceSelect::new(client.clone(), id.clone(), name.clone(), DeviceDirection::Output),
            input_select: DeviceSelect::new(client.clone(), id.clone(), name.clone(), DeviceDirection::Input),
            sensors,
            shuffle: ToggleSwitch::new(client.clone(), id.clone(), name.clone(), SwitchKind::Shuffle),
            repeat: ToggleSwitch::new(client.clone(), id, name, SwitchKind::Repeat),
            config,
            client,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn sensor(&self, kind: SensorKind) -> Option<&MetadataSensor<C>> {
        self.sensors.iter().find(|s| s.kind() == kind)
    }

    pub fn entities(&self) -> Vec<&dyn Entity> {
        let mut out: Vec<&dyn Entity> = vec![
            &self.media_player as &dyn Entity,
            &self.output_select as &dyn Entity,
            &self.input_select as &dyn Entity,
        ];
        out.extend(self.sensors.iter().map(|s| s as &dyn Entity));
        out.push(&self.shuffle);
        out.push(&self.repeat);
        out
    }

    fn entities_mut(&mut self) -> Vec<&mut dyn Entity> {
        let mut out: Vec<&mut dyn Entity> = vec![
            &mut self.media_player as &mut dyn Entity,
            &mut self.output_select as &mut dyn Entity,
            &mut self.input_select as &mut dyn Entity,
        ];
        out.extend(self.sensors.iter_mut().map(|s| s as &mut dyn Entity));
        out.push(&mut self.shuffle);
        out.push(&mut self.repeat);
        out
    }

    /// Runs one poll cycle for every adapter concurrently.
    pub async fn refresh_all(&mut self) {
        join_all(self.entities_mut().into_iter().map(|entity| entity.refresh())).await;
    }

    pub fn report(&self) -> BridgeReport {
        BridgeReport {
            ts: Utc::now(),
            bridge_id: self.config.address.identity(),
            name: self.config.name.clone(),
            entities: self
                .entities()
                .into_iter()
                .map(|entity| EntityReport {
                    kind: entity.kind(),
                    unique_id: entity.unique_id(),
                    name: entity.name(),
                    icon: entity.icon(),
                    availability: entity.availability().clone(),
                    state: entity.state(),
                })
                .collect(),
        }
    }
}

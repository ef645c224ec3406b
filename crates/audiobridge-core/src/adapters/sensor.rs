use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Entity, EntityIdentity, EntityKind};
use crate::availability::Availability;
use crate::client::BridgeClient;
use crate::endpoint::BridgeEndpoint;
use crate::mapper::{map_current_device, map_media_info, map_media_state};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    TrackTitle,
    Artist,
    Album,
    PlaybackState,
    OutputDevice,
    InputDevice,
}

impl SensorKind {
    pub const ALL: [SensorKind; 6] = [
        SensorKind::TrackTitle,
        SensorKind::Artist,
        SensorKind::Album,
        SensorKind::PlaybackState,
        SensorKind::OutputDevice,
        SensorKind::InputDevice,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SensorKind::TrackTitle => "track_title",
            SensorKind::Artist => "artist",
            SensorKind::Album => "album",
            SensorKind::PlaybackState => "playback_state",
            SensorKind::OutputDevice => "output_device",
            SensorKind::InputDevice => "input_device",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SensorKind::TrackTitle => "Track Title",
            SensorKind::Artist => "Artist",
            SensorKind::Album => "Album",
            SensorKind::PlaybackState => "Playback State",
            SensorKind::OutputDevice => "Output Device",
            SensorKind::InputDevice => "Input Device",
        }
    }

    /// Shown whenever the bridge reports nothing for this sensor.
    pub fn placeholder(self) -> &'static str {
        match self {
            SensorKind::TrackTitle => "Not Playing",
            SensorKind::PlaybackState => "Stopped",
            SensorKind::Artist | SensorKind::Album | SensorKind::OutputDevice | SensorKind::InputDevice => {
                "Unknown"
            }
        }
    }

    fn icon(self) -> &'static str {
        match self {
            SensorKind::TrackTitle => "mdi:music-note",
            SensorKind::Artist => "mdi:account-music",
            SensorKind::Album => "mdi:album",
            SensorKind::PlaybackState => "mdi:play-pause",
            SensorKind::OutputDevice => "mdi:speaker",
            SensorKind::InputDevice => "mdi:microphone",
        }
    }

    fn endpoint(self) -> BridgeEndpoint {
        match self {
            SensorKind::TrackTitle | SensorKind::Artist | SensorKind::Album => BridgeEndpoint::MediaInfo,
            SensorKind::PlaybackState => BridgeEndpoint::MediaState,
            SensorKind::OutputDevice => BridgeEndpoint::OutputDevice,
            SensorKind::InputDevice => BridgeEndpoint::InputDevice,
        }
    }

    fn extract(self, json: &Value) -> Option<String> {
        match self {
            SensorKind::TrackTitle => map_media_info(json).title,
            SensorKind::Artist => map_media_info(json).artist,
            SensorKind::Album => map_media_info(json).album,
            SensorKind::PlaybackState => Some(map_media_state(json).label().to_string()),
            SensorKind::OutputDevice | SensorKind::InputDevice => map_current_device(json),
        }
    }
}

/// Read-only text sensor mirroring one bridge field.
pub struct MetadataSensor<C: BridgeClient> {
    client: Arc<C>,
    identity: EntityIdentity,
    kind: SensorKind,
    value: Option<String>,
    availability: Availability,
}

impl<C: BridgeClient> MetadataSensor<C> {
    pub fn new(
        client: Arc<C>,
        bridge_id: impl Into<String>,
        bridge_name: impl Into<String>,
        kind: SensorKind,
    ) -> Self {
        Self {
            client,
            identity: EntityIdentity::new(bridge_id, bridge_name),
            kind,
            value: None,
            availability: Availability::default(),
        }
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Last value reported by the bridge, `None` when it reported nothing.
    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn native_value(&self) -> &str {
        self.value.as_deref().unwrap_or(self.kind.placeholder())
    }
}

#[async_trait]
impl<C: BridgeClient> Entity for MetadataSensor<C> {
    fn kind(&self) -> EntityKind {
        EntityKind::Sensor
    }

    fn unique_id(&self) -> String {
        self.identity.unique_id(self.kind.key())
    }

    fn name(&self) -> String {
        self.identity.display_name(self.kind.label())
    }

    fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    fn availability(&self) -> &Availability {
        &self.availability
    }

    fn state(&self) -> Value {
        json!({ "native_value": self.native_value() })
    }

    async fn refresh(&mut self) {
        let result = self.client.get(self.kind.endpoint()).await;
        if let Some(json) = self.availability.track(self.kind.key(), result) {
            self.value = self.kind.extract(&json);
        }
    }
}

pub mod adapters;
pub mod availability;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod hub;
pub mod mapper;
pub mod setup;

#[cfg(test)]
mod mapper_tests;
#[cfg(test)]
mod test_support;

pub use adapters::{
    DeviceDirection, DeviceSelect, Entity, EntityKind, MediaPlayer, MetadataSensor, PlayerFeature, PlayerState, SensorKind,
    SwitchKind, ToggleSwitch,
};
pub use availability::Availability;
pub use client::{BridgeClient, BridgeError, HttpBridgeClient};
pub use config::{BridgeAddress, BridgeConfig, DEFAULT_NAME, DEFAULT_PORT};
pub use endpoint::{BridgeEndpoint, HttpMethod, MediaAction};
pub use hub::{BridgeHub, BridgeReport, EntityReport};
pub use mapper::{DeviceDescriptor, MediaInfoSnapshot, PlaybackPhase, RepeatMode, StatusSnapshot};
pub use setup::{ConfiguredBridges, SetupError, ValidatedBridge};

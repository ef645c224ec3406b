use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use super::{Entity, EntityIdentity, EntityKind};
use crate::availability::Availability;
use crate::client::{BridgeClient, BridgeError};
use crate::endpoint::{BridgeEndpoint, MediaAction};
use crate::mapper::{map_media_info, map_status, MediaInfoSnapshot, PlaybackPhase, StatusSnapshot};

const ENTITY: &str = "media_player";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Idle,
    Playing,
    Paused,
}

impl From<PlaybackPhase> for PlayerState {
    fn from(phase: PlaybackPhase) -> Self {
        match phase {
            PlaybackPhase::Playing => PlayerState::Playing,
            PlaybackPhase::Paused => PlayerState::Paused,
            PlaybackPhase::Stopped => PlayerState::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerFeature {
    VolumeSet,
    VolumeMute,
    VolumeStep,
    Play,
    Pause,
    Stop,
    NextTrack,
    PreviousTrack,
    Seek,
}

/// Playback and volume control for the bridge's system output.
pub struct MediaPlayer<C: BridgeClient> {
    client: Arc<C>,
    identity: EntityIdentity,
    volume_step: u8,
    status: StatusSnapshot,
    media: MediaInfoSnapshot,
    availability: Availability,
}

impl<C: BridgeClient> MediaPlayer<C> {
    pub const FEATURES: [PlayerFeature; 9] = [
        PlayerFeature::VolumeSet,
        PlayerFeature::VolumeMute,
        PlayerFeature::VolumeStep,
        PlayerFeature::Play,
        PlayerFeature::Pause,
        PlayerFeature::Stop,
        PlayerFeature::NextTrack,
        PlayerFeature::PreviousTrack,
        PlayerFeature::Seek,
    ];

    pub fn new(
        client: Arc<C>,
        bridge_id: impl Into<String>,
        bridge_name: impl Into<String>,
        volume_step: u8,
    ) -> Self {
        Self {
            client,
            identity: EntityIdentity::new(bridge_id, bridge_name),
            volume_step,
            status: StatusSnapshot::default(),
            media: MediaInfoSnapshot::default(),
            availability: Availability::default(),
        }
    }

    pub fn player_state(&self) -> PlayerState {
        self.status.playback_phase.into()
    }

    pub fn volume_level(&self) -> f64 {
        self.status.volume_fraction()
    }

    pub fn is_volume_muted(&self) -> bool {
        self.status.muted
    }

    pub fn status(&self) -> &StatusSnapshot {
        &self.status
    }

    pub fn media(&self) -> &MediaInfoSnapshot {
        &self.media
    }

    /// Sets volume from a 0.0..=1.0 fraction.
    pub async fn set_volume_level(&mut self, level: f64) -> Result<(), BridgeError> {
        let percent = (level.clamp(0.0, 1.0) * 100.0).round() as u8;
        self.set_volume_percent(percent).await
    }

    pub async fn set_volume_percent(&mut self, percent: u8) -> Result<(), BridgeError> {
        let percent = percent.min(100);
        self.command(BridgeEndpoint::SetVolume, Some(json!({ "volume": percent })))
            .await?;
        self.status.volume_percent = percent;
        Ok(())
    }

    pub async fn volume_up(&mut self) -> Result<(), BridgeError> {
        let target = self.status.volume_percent.saturating_add(self.volume_step);
        self.set_volume_percent(target.min(100)).await
    }

    pub async fn volume_down(&mut self) -> Result<(), BridgeError> {
        let target = self.status.volume_percent.saturating_sub(self.volume_step);
        self.set_volume_percent(target).await
    }

    pub async fn mute_volume(&mut self, mute: bool) -> Result<(), BridgeError> {
        self.command(BridgeEndpoint::SetMute, Some(json!({ "muted": mute })))
            .await?;
        self.status.muted = mute;
        Ok(())
    }

    pub async fn media_play(&mut self) -> Result<(), BridgeError> {
        self.command(BridgeEndpoint::Media(MediaAction::Play), None).await?;
        self.status.playback_phase = PlaybackPhase::Playing;
        Ok(())
    }

    pub async fn media_pause(&mut self) -> Result<(), BridgeError> {
        self.command(BridgeEndpoint::Media(MediaAction::Pause), None).await?;
        self.status.playback_phase = PlaybackPhase::Paused;
        Ok(())
    }

    pub async fn media_stop(&mut self) -> Result<(), BridgeError> {
        self.command(BridgeEndpoint::Media(MediaAction::Stop), None).await?;
        self.status.playback_phase = PlaybackPhase::Stopped;
        Ok(())
    }

    pub async fn media_next_track(&mut self) -> Result<(), BridgeError> {
        self.command(BridgeEndpoint::Media(MediaAction::Next), None).await
    }

    pub async fn media_previous_track(&mut self) -> Result<(), BridgeError> {
        self.command(BridgeEndpoint::Media(MediaAction::Previous), None).await
    }

    /// Toggles playback. The bridge answers with the resulting state; without it
    /// the phase is flipped locally.
    pub async fn media_play_pause(&mut self) -> Result<(), BridgeError> {
        let endpoint = BridgeEndpoint::Media(MediaAction::PlayPause);
        let result = self.client.post_for_body(endpoint, None).await;
        let body = self.finish(endpoint, result)?;

        self.status.playback_phase = match body.get("state").and_then(Value::as_str) {
            Some(raw) => PlaybackPhase::parse(Some(raw)),
            None if self.status.playback_phase == PlaybackPhase::Playing => PlaybackPhase::Paused,
            None => PlaybackPhase::Playing,
        };
        Ok(())
    }

    /// Seeks to a position in seconds; the bridge only takes whole seconds.
    pub async fn media_seek(&mut self, position: f64) -> Result<(), BridgeError> {
        let seconds = position.max(0.0).round() as i64;
        self.command(BridgeEndpoint::Seek, Some(json!({ "position": seconds })))
            .await?;
        self.media.position_seconds = Some(seconds as f64);
        Ok(())
    }

    async fn command(&mut self, endpoint: BridgeEndpoint, body: Option<Value>) -> Result<(), BridgeError> {
        let result = self.client.post(endpoint, body).await;
        self.finish(endpoint, result)
    }

    fn finish<T>(&mut self, endpoint: BridgeEndpoint, result: Result<T, BridgeError>) -> Result<T, BridgeError> {
        match result {
            Ok(value) => {
                self.availability.mark_ok();
                Ok(value)
            }
            Err(err) => {
                warn!(entity = ENTITY, %endpoint, error = %err, "command failed");
                self.availability.mark_failed(ENTITY, &err);
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<C: BridgeClient> Entity for MediaPlayer<C> {
    fn kind(&self) -> EntityKind {
        EntityKind::MediaPlayer
    }

    fn unique_id(&self) -> String {
        self.identity.unique_id("macos_audio")
    }

    fn name(&self) -> String {
        self.identity.bridge_name.clone()
    }

    fn icon(&self) -> &'static str {
        "mdi:speaker"
    }

    fn availability(&self) -> &Availability {
        &self.availability
    }

    fn state(&self) -> Value {
        json!({
            "state": self.player_state(),
            "volume_level": self.volume_level(),
            "is_volume_muted": self.is_volume_muted(),
            "media_title": self.media.title,
            "media_artist": self.media.artist,
            "media_album_name": self.media.album,
            "media_duration": self.media.duration_seconds,
            "media_position": self.media.position_seconds,
            "shuffle": self.media.shuffle,
            "repeat": self.media.repeat,
            "supported_features": Self::FEATURES,
        })
    }

    async fn refresh(&mut self) {
        let result = self.client.get(BridgeEndpoint::Status).await;
        let Some(status) = self.availability.track(ENTITY, result) else {
            return;
        };
        let result = self.client.get(BridgeEndpoint::MediaInfo).await;
        let Some(media) = self.availability.track(ENTITY, result) else {
            return;
        };

        self.status = map_status(&status);
        self.media = map_media_info(&media);
    }
}

//! Pure translation from bridge payloads to typed snapshots.
//!
//! Mapping never fails: missing or mistyped fields fall back to defaults and
//! only transport failures are reported by the client. Display placeholders
//! are not applied here; absent strings stay `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_VOLUME_PERCENT: u8 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackPhase {
    /// `"playing"` and `"paused"` are recognised; anything else is stopped.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("playing") => PlaybackPhase::Playing,
            Some("paused") => PlaybackPhase::Paused,
            _ => PlaybackPhase::Stopped,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackPhase::Stopped => "Stopped",
            PlaybackPhase::Playing => "Playing",
            PlaybackPhase::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub volume_percent: u8,
    pub muted: bool,
    pub playback_phase: PlaybackPhase,
}

impl StatusSnapshot {
    pub fn volume_fraction(&self) -> f64 {
        f64::from(self.volume_percent) / 100.0
    }
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            volume_percent: DEFAULT_VOLUME_PERCENT,
            muted: false,
            playback_phase: PlaybackPhase::Stopped,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
    /// Unrecognised mode reported by the bridge, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl RepeatMode {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("off") => RepeatMode::Off,
            Some("all") => RepeatMode::All,
            Some("one") => RepeatMode::One,
            Some(other) => RepeatMode::Other(other.to_string()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self != RepeatMode::Off
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInfoSnapshot {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration_seconds: Option<f64>,
    pub position_seconds: Option<f64>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub name: String,
    pub has_input: bool,
    pub has_output: bool,
}

pub fn map_status(json: &Value) -> StatusSnapshot {
    let volume_percent = json
        .get("volume")
        .and_then(percent_value)
        .unwrap_or(DEFAULT_VOLUME_PERCENT);

    StatusSnapshot {
        volume_percent,
        muted: json.get("muted").and_then(Value::as_bool).unwrap_or(false),
        playback_phase: PlaybackPhase::parse(json.get("playback_state").and_then(Value::as_str)),
    }
}

pub fn map_media_info(json: &Value) -> MediaInfoSnapshot {
    MediaInfoSnapshot {
        title: non_empty_string(json, "title"),
        artist: non_empty_string(json, "artist"),
        album: non_empty_string(json, "album"),
        duration_seconds: json.get("duration").and_then(Value::as_f64),
        position_seconds: json.get("position").and_then(Value::as_f64),
        shuffle: json.get("shuffle").and_then(Value::as_bool).unwrap_or(false),
        repeat: RepeatMode::parse(json.get("repeat").and_then(Value::as_str)),
    }
}

pub fn map_media_state(json: &Value) -> PlaybackPhase {
    PlaybackPhase::parse(json.get("state").and_then(Value::as_str))
}

/// Every named entry of the `devices` list, in server order.
pub fn map_device_list(json: &Value) -> Vec<DeviceDescriptor> {
    let Some(devices) = json.get("devices").and_then(Value::as_array) else {
        return Vec::new();
    };

    devices
        .iter()
        .filter_map(|dev| {
            let name = dev.get("name").and_then(Value::as_str)?;
            Some(DeviceDescriptor {
                name: name.to_string(),
                has_input: capability(dev, "has_input", "is_input"),
                has_output: capability(dev, "has_output", "is_output"),
            })
        })
        .collect()
}

/// Names of devices carrying the requested capability. Duplicates pass through.
pub fn map_devices(json: &Value, want_output: bool) -> Vec<String> {
    map_device_list(json)
        .into_iter()
        .filter(|dev| if want_output { dev.has_output } else { dev.has_input })
        .map(|dev| dev.name)
        .collect()
}

pub fn map_current_device(json: &Value) -> Option<String> {
    non_empty_string(json, "name")
}

fn percent_value(value: &Value) -> Option<u8> {
    let raw = value
        .as_i64()
        .or_else(|| value.as_f64().map(|v| v.trunc() as i64))?;
    Some(raw.clamp(0, 100) as u8)
}

fn non_empty_string(json: &Value, key: &str) -> Option<String> {
    json.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// The bridge has shipped both spellings of the capability flags.
fn capability(dev: &Value, key: &str, alt: &str) -> bool {
    dev.get(key)
        .or_else(|| dev.get(alt))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

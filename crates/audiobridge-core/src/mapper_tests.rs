use serde_json::json;

use crate::client::decode_body;
use crate::endpoint::BridgeEndpoint;
use crate::mapper::{
    map_current_device, map_device_list, map_devices, map_media_info, map_media_state, map_status, PlaybackPhase,
    RepeatMode,
};

#[test]
fn status_volume_fraction_recovers_every_percent() {
    for p in 0..=100_u8 {
        // Act
        let status = map_status(&json!({ "volume": p }));

        // Assert
        assert_eq!(status.volume_percent, p);
        assert_eq!(status.volume_fraction(), f64::from(p) / 100.0);
        assert_eq!((status.volume_fraction() * 100.0).round() as u8, p);
    }
}

#[test]
fn empty_status_uses_defaults() {
    let status = map_status(&json!({}));

    assert_eq!(status.volume_percent, 50);
    assert!(!status.muted);
    assert_eq!(status.playback_phase, PlaybackPhase::Stopped);
}

#[test]
fn null_status_uses_defaults() {
    let status = map_status(&serde_json::Value::Null);

    assert_eq!(status.volume_percent, 50);
    assert_eq!(status.playback_phase, PlaybackPhase::Stopped);
}

#[test]
fn playback_state_maps_known_phases_only() {
    let phase = |raw: serde_json::Value| map_status(&json!({ "playback_state": raw })).playback_phase;

    assert_eq!(phase(json!("playing")), PlaybackPhase::Playing);
    assert_eq!(phase(json!("paused")), PlaybackPhase::Paused);
    assert_eq!(phase(json!("anything-else")), PlaybackPhase::Stopped);
    assert_eq!(phase(json!(3)), PlaybackPhase::Stopped);
    assert_eq!(map_status(&json!({ "volume": 10 })).playback_phase, PlaybackPhase::Stopped);
}

#[test]
fn status_volume_out_of_range_is_clamped() {
    assert_eq!(map_status(&json!({ "volume": 140 })).volume_percent, 100);
    assert_eq!(map_status(&json!({ "volume": -3 })).volume_percent, 0);
    assert_eq!(map_status(&json!({ "volume": 42.9 })).volume_percent, 42);
    assert_eq!(map_status(&json!({ "volume": "loud" })).volume_percent, 50);
}

#[test]
fn media_info_keeps_absence_distinct_from_values() {
    // Arrange
    let payload = json!({
        "title": "So What",
        "artist": "",
        "duration": 540,
        "position": 12.5,
        "shuffle": true,
        "repeat": "all"
    });

    // Act
    let info = map_media_info(&payload);

    // Assert
    assert_eq!(info.title.as_deref(), Some("So What"));
    assert_eq!(info.artist, None, "empty string becomes absent");
    assert_eq!(info.album, None, "missing field becomes absent");
    assert_eq!(info.duration_seconds, Some(540.0));
    assert_eq!(info.position_seconds, Some(12.5));
    assert!(info.shuffle);
    assert_eq!(info.repeat, RepeatMode::All);
}

#[test]
fn media_info_defaults_when_empty() {
    let info = map_media_info(&json!({}));

    assert_eq!(info.title, None);
    assert_eq!(info.duration_seconds, None);
    assert!(!info.shuffle);
    assert_eq!(info.repeat, RepeatMode::Off);
}

#[test]
fn repeat_mode_keeps_unknown_values_enabled() {
    let info = map_media_info(&json!({ "repeat": "shuffle-all" }));

    assert_eq!(info.repeat, RepeatMode::Other("shuffle-all".to_string()));
    assert!(info.repeat.is_enabled());
    assert!(!RepeatMode::Off.is_enabled());
    assert!(RepeatMode::One.is_enabled());
}

#[test]
fn media_state_reads_state_field() {
    assert_eq!(map_media_state(&json!({ "state": "paused", "is_running": true })), PlaybackPhase::Paused);
    assert_eq!(map_media_state(&json!({ "is_running": false })), PlaybackPhase::Stopped);
}

#[test]
fn devices_filter_by_output_capability() {
    let payload = json!({
        "devices": [
            { "name": "A", "has_output": true },
            { "name": "B", "has_output": false }
        ]
    });

    assert_eq!(map_devices(&payload, true), vec!["A".to_string()]);
    assert!(map_devices(&payload, false).is_empty());
}

#[test]
fn devices_preserve_order_and_duplicates() {
    let payload = json!({
        "devices": [
            { "name": "Mic", "has_input": true, "has_output": false },
            { "name": "Speakers", "has_output": true },
            { "name": "Headset", "has_input": true, "has_output": true },
            { "name": "Speakers", "has_output": true },
            { "has_output": true }
        ]
    });

    assert_eq!(map_devices(&payload, true), vec!["Speakers", "Headset", "Speakers"]);
    assert_eq!(map_devices(&payload, false), vec!["Mic", "Headset"]);
}

#[test]
fn devices_accept_bridge_capability_spelling() {
    let payload = json!({
        "devices": [
            { "id": 73, "name": "MacBook Pro Speakers", "uid": "BuiltInSpeakerDevice", "is_input": false, "is_output": true },
            { "id": 80, "name": "MacBook Pro Microphone", "uid": "BuiltInMicrophoneDevice", "is_input": true, "is_output": false }
        ],
        "count": 2
    });

    let list = map_device_list(&payload);

    assert_eq!(list.len(), 2);
    assert!(list[0].has_output && !list[0].has_input);
    assert_eq!(map_devices(&payload, false), vec!["MacBook Pro Microphone"]);
}

#[test]
fn devices_missing_list_is_empty() {
    assert!(map_devices(&json!({ "count": 0 }), true).is_empty());
    assert!(map_devices(&json!({ "devices": "nope" }), true).is_empty());
}

#[test]
fn current_device_name_or_absent() {
    assert_eq!(map_current_device(&json!({ "id": 1, "name": "Speakers" })).as_deref(), Some("Speakers"));
    assert_eq!(map_current_device(&json!({ "name": "" })), None);
    assert_eq!(map_current_device(&json!({})), None);
}

#[test]
fn malformed_body_decodes_to_null_and_maps_to_defaults() {
    // Act
    let value = decode_body(BridgeEndpoint::Status, b"<html>oops</html>");

    // Assert
    assert!(value.is_null());
    assert_eq!(map_status(&value).volume_percent, 50);
    assert!(decode_body(BridgeEndpoint::Status, b"  \n").is_null());
    assert_eq!(decode_body(BridgeEndpoint::Status, br#"{"volume":7}"#)["volume"], 7);
}

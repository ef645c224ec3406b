use std::fmt::Write;

use audiobridge_core::{BridgeReport, EntityKind, EntityReport};
use serde_json::Value;

pub fn human(report: &BridgeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ({}) ===", report.name, report.bridge_id);
    let _ = writeln!(out, "Time:       {}", report.ts.to_rfc3339());

    for entity in &report.entities {
        let _ = writeln!(out, "{:<40} {}", entity.name, describe(entity));
    }

    out
}

fn describe(entity: &EntityReport) -> String {
    if !entity.availability.available {
        let reason = entity.availability.last_failure.as_deref().unwrap_or("n/a");
        return format!("unavailable ({reason})");
    }

    let state = &entity.state;
    match entity.kind {
        EntityKind::Sensor => state
            .get("native_value")
            .and_then(Value::as_str)
            .unwrap_or("n/a")
            .to_string(),
        EntityKind::Switch => {
            let on = state.get("is_on").and_then(Value::as_bool).unwrap_or(false);
            if on { "on".to_string() } else { "off".to_string() }
        }
        EntityKind::Select => {
            let count = state.get("options").and_then(Value::as_array).map_or(0, Vec::len);
            let current = state
                .get("current_option")
                .and_then(Value::as_str)
                .unwrap_or("n/a");
            format!("{current} [{count} options]")
        }
        EntityKind::MediaPlayer => describe_player(state),
    }
}

fn describe_player(state: &Value) -> String {
    let player_state = state.get("state").and_then(Value::as_str).unwrap_or("n/a");
    let volume = state
        .get("volume_level")
        .and_then(Value::as_f64)
        .map(|v| (v * 100.0).round() as u8)
        .unwrap_or(0);
    let muted = state
        .get("is_volume_muted")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let mut line = format!("{player_state} vol={volume}%");
    if muted {
        line.push_str(" muted");
    }
    if let Some(title) = state.get("media_title").and_then(Value::as_str) {
        let _ = write!(line, " \"{title}\"");
    }
    line
}

//! Turns untrusted wheel payloads into well-formed [`WheelConfig`]s.
//!
//! Sanitization never fails. Invalid or missing fields fall back to their
//! defaults; the only thing silently dropped is a participant without a
//! usable name.

use serde_json::{Map, Value};

use crate::id_generator::{generate_id, generate_wheel_id, is_valid_wheel_id, WHEEL_ID_LENGTH};
use crate::wheel::{
    now_millis, ColorScheme, Participant, WheelConfig, DEFAULT_TIMER_SECS, MAX_COLOR_LENGTH,
    MAX_NAME_LENGTH, MAX_PARTICIPANTS, MAX_PARTICIPANT_ID_LENGTH, MAX_TIMER_SECS,
    MIN_TIMER_SECS,
};

/// Sanitize `payload` using the current time.
pub fn sanitize(payload: &Value) -> WheelConfig {
    sanitize_at(payload, now_millis())
}

/// Sanitize `payload` as of `now_ms`.
pub fn sanitize_at(payload: &Value, now_ms: i64) -> WheelConfig {
    let empty = Map::new();
    let data = payload.as_object().unwrap_or(&empty);

    let participants: Vec<Participant> = data
        .get("participants")
        .and_then(Value::as_array)
        .map(|raw| {
            raw.iter()
                .take(MAX_PARTICIPANTS)
                .filter_map(sanitize_participant)
                .collect()
        })
        .unwrap_or_default();

    let id = match data.get("id").and_then(Value::as_str) {
        Some(id) if is_valid_wheel_id(id) => id.to_string(),
        _ => generate_wheel_id(),
    };

    let color_scheme = data
        .get("colorScheme")
        .and_then(Value::as_str)
        .and_then(ColorScheme::parse)
        .unwrap_or_default();

    let created_at = if claims_existing_wheel(data) {
        data.get("createdAt")
            .and_then(as_finite_number)
            .map(|ms| (ms.floor() as i64).min(now_ms))
            .unwrap_or(now_ms)
    } else {
        now_ms
    };

    WheelConfig {
        id,
        participants,
        timer_duration: sanitize_timer(data.get("timerDuration")),
        timer_enabled: bool_or(data, "timerEnabled", true),
        dark_mode: bool_or(data, "darkMode", false),
        fast_mode: bool_or(data, "fastMode", false),
        sound_enabled: bool_or(data, "soundEnabled", true),
        idle_spin_enabled: bool_or(data, "idleSpinEnabled", false),
        color_scheme,
        created_at,
        last_accessed_at: now_ms,
    }
}

/// Whether the payload presents itself as an edit of an existing wheel,
/// i.e. it carries a truthy `id` of any type. The store is not consulted here.
pub fn claims_existing_wheel(data: &Map<String, Value>) -> bool {
    match data.get("id") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(id)) => !id.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Returns `None` when the entry has no usable name and must be dropped.
pub fn sanitize_participant(raw: &Value) -> Option<Participant> {
    let obj = raw.as_object()?;

    let name = obj.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }

    let id = match obj.get("id").and_then(Value::as_str) {
        Some(id) => truncate(id, MAX_PARTICIPANT_ID_LENGTH),
        None => generate_id(WHEEL_ID_LENGTH),
    };

    Some(Participant {
        id,
        name: truncate(name, MAX_NAME_LENGTH),
        active: obj.get("active").and_then(Value::as_bool).unwrap_or(true),
        color: obj
            .get("color")
            .and_then(Value::as_str)
            .map(|color| truncate(color, MAX_COLOR_LENGTH)),
    })
}

fn sanitize_timer(raw: Option<&Value>) -> u32 {
    match raw.and_then(as_finite_number) {
        Some(secs) => secs
            .floor()
            .clamp(f64::from(MIN_TIMER_SECS), f64::from(MAX_TIMER_SECS)) as u32,
        None => DEFAULT_TIMER_SECS,
    }
}

fn bool_or(data: &Map<String, Value>, key: &str, default: bool) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn as_finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Truncate to at most `max` characters (not bytes).
fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

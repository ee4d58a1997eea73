//! Interpretation of the loosely specified success signals that WhatsApp
//! backends put in their JSON replies.
//!
//! Precedence is fixed: a boolean-like flag, when present, decides on its
//! own; free text is consulted only when no flag is present. A reply such as
//! `{"status": false, "message": "unsuccessful"}` is therefore a failure even
//! though the text contains `success`.

use serde_json::Value as JsonValue;

const SEND_FLAGS: [&str; 2] = ["status", "success"];
const SEND_TEXT_FIELDS: [&str; 2] = ["msg", "message"];
const CONNECTED_FLAGS: [&str; 3] = ["connected", "online", "active"];

/// True when the body opens like an HTML document rather than data.
pub fn looks_like_markup(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(9).collect();
    let head = head.to_ascii_lowercase();

    head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Reads a boolean-like JSON value: `true`/`false`, `1`/`0`, and their
/// string spellings. Anything else has no boolean meaning.
pub fn truthy(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn flag(json: &JsonValue, name: &str) -> Option<bool> {
    json.get(name).and_then(truthy)
}

/// First non-empty string among `fields`.
pub fn first_text(json: &JsonValue, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| json.get(*field).and_then(JsonValue::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

fn mentions_success(json: &JsonValue, field: &str) -> bool {
    json.get(field)
        .and_then(JsonValue::as_str)
        .is_some_and(|text| text.to_lowercase().contains("success"))
}

/// Whether a send reply says the message was accepted.
pub fn send_accepted(json: &JsonValue) -> bool {
    if let Some(decided) = SEND_FLAGS.iter().find_map(|name| flag(json, name)) {
        return decided;
    }

    SEND_TEXT_FIELDS
        .iter()
        .any(|field| mentions_success(json, field))
}

/// Whether a status reply says the device/session is connected.
pub fn device_connected(json: &JsonValue) -> bool {
    let by_flag = CONNECTED_FLAGS
        .iter()
        .any(|name| flag(json, name) == Some(true));

    let by_status_text = json
        .get("status")
        .and_then(JsonValue::as_str)
        .is_some_and(|status| status.trim().eq_ignore_ascii_case("connected"));

    by_flag || by_status_text
}

/// Device identifier reported by a status reply, if any.
pub fn device_label(json: &JsonValue) -> Option<String> {
    ["device", "phone"]
        .iter()
        .filter_map(|field| json.get(*field))
        .find(|value| !value.is_null())
        .map(|value| match value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        })
}

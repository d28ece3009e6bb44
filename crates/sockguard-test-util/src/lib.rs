//! Shared test utilities for the sockguard workspace.
//!
//! The CLI integration tests compare whole JSON reports, which carry a tool
//! version and wall-clock timestamps.

#![forbid(unsafe_code)]

use serde_json::Value;

pub const VERSION_PLACEHOLDER: &str = "__VERSION__";
pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const PATH_PLACEHOLDER: &str = "__PATH__";

/// Normalize non-deterministic JSON fields for golden comparison.
///
/// `tool.version` is replaced only when the *root* object is a report envelope
/// (`schema`, `tool`, `verdict`, `repositories`, `data`), so that nested objects
/// with the same shape are left alone. `started_at` and `finished_at` are
/// replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "repositories", "data"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("name")
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

/// Replace `policy_file` and `org_file` values with a placeholder.
///
/// Those are absolute paths inside a temporary directory in tests.
pub fn normalize_paths(mut value: Value) -> Value {
    normalize_paths_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(
                        key.to_string(),
                        Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
                    );
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

fn normalize_paths_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["policy_file", "org_file"] {
                if let Some(v) = map.get_mut(key)
                    && v.is_string()
                {
                    *v = Value::String(PATH_PLACEHOLDER.to_string());
                }
            }
            for val in map.values_mut() {
                normalize_paths_recursive(val);
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(normalize_paths_recursive),
        _ => {}
    }
}

//! JSON payload to [`Entry`] converter, plus the bundled sample timeline.

use serde_json::{Map, Value};
use timeline_core::{Entry, TimelineConfig, TimelineError};
use tracing::debug;

/// Sample payload shipped with the crate.
pub const SAMPLE_ENTRIES_JSON: &str = include_str!("../data/sample_entries.json");

/// Base URL the sample's relative image and icon paths resolve against.
pub const SAMPLE_ASSET_BASE_URL: &str =
    "https://raw.githubusercontent.com/moomoocowsteam/timeline_app/main/";

/// Keys under which a wrapping object may carry the entry list.
const LIST_KEYS: [&str; 2] = ["events", "entries"];

/// Parse entries from a JSON string.
pub fn parse_entries_str(payload: &str) -> Result<Vec<Entry>, TimelineError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|err| TimelineError::Parse(err.to_string()))?;
    parse_entries_value(&value)
}

/// Parse entries from a `serde_json::Value`.
///
/// Accepts a bare array or an object with an `events`/`entries` array.
/// `null` fields are treated as missing, so they fall back to defaults.
pub fn parse_entries_value(payload: &Value) -> Result<Vec<Entry>, TimelineError> {
    let list = match payload {
        Value::Array(items) => items,
        Value::Object(object) => LIST_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_array))
            .ok_or(TimelineError::MissingData)?,
        other => {
            return Err(TimelineError::Parse(format!(
                "Expected an array of entries, received {}",
                kind_of(other)
            )))
        }
    };

    let entries = list
        .iter()
        .enumerate()
        .map(|(index, item)| parse_entry(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = entries.len(), "timeline payload parsed");
    Ok(entries)
}

fn parse_entry(index: usize, item: &Value) -> Result<Entry, TimelineError> {
    let Some(object) = item.as_object() else {
        return Err(TimelineError::InvalidEntry {
            index,
            reason: format!("expected an object, received {}", kind_of(item)),
        });
    };

    serde_json::from_value(Value::Object(without_nulls(object))).map_err(|err| {
        TimelineError::InvalidEntry {
            index,
            reason: err.to_string(),
        }
    })
}

fn without_nulls(object: &Map<String, Value>) -> Map<String, Value> {
    object
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a config from a JSON string. Missing or `null` fields keep their
/// defaults.
pub fn parse_config_str(payload: &str) -> Result<TimelineConfig, TimelineError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|err| TimelineError::Parse(err.to_string()))?;
    parse_config_value(&value)
}

/// Parse a config from a `serde_json::Value`; `null` means all defaults.
pub fn parse_config_value(payload: &Value) -> Result<TimelineConfig, TimelineError> {
    let object = match payload {
        Value::Null => return Ok(TimelineConfig::default()),
        Value::Object(object) => without_nulls(object),
        other => {
            return Err(TimelineError::Parse(format!(
                "Expected a config object, received {}",
                kind_of(other)
            )))
        }
    };
    serde_json::from_value(Value::Object(object))
        .map_err(|err| TimelineError::Parse(format!("invalid config: {err}")))
}

/// The bundled sample entries.
pub fn sample_entries() -> Result<Vec<Entry>, TimelineError> {
    parse_entries_str(SAMPLE_ENTRIES_JSON)
}

/// Default config with the sample's asset base URL.
pub fn sample_config() -> TimelineConfig {
    TimelineConfig {
        asset_base_url: SAMPLE_ASSET_BASE_URL.to_string(),
        ..TimelineConfig::default()
    }
}

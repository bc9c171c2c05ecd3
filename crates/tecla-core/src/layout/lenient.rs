//! Field-presence-driven deserializers for hand-authored layout documents.
//!
//! Documents in the wild mix strings and numbers freely and sometimes put
//! garbage where an index belongs. Every helper here degrades to the nearest
//! sensible value instead of failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::entry::DeleteCount;
use super::{Key, Mode};

/// Text carried by a string or number value.
pub(super) fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like `value_text`, but empty strings count as absent.
pub(super) fn label_text(v: &Value) -> Option<String> {
    value_text(v).filter(|s| !s.is_empty())
}

/// Grid coordinate; anything other than a non-negative integer becomes 0.
pub(super) fn grid_index(v: Option<&Value>) -> u32 {
    let parsed = match v {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match parsed.and_then(|n| u32::try_from(n).ok()) {
        Some(n) => n,
        None => {
            if v.is_some_and(|v| !v.is_null()) {
                debug!(value = ?v, "defaulting malformed grid index to 0");
            }
            0
        }
    }
}

pub(super) fn payload<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(&Value::deserialize(d)?))
}

pub(super) fn text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(label_text(&Value::deserialize(d)?))
}

pub(super) fn mode<'de, D>(d: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Records presence: a field that exists (even as `null`) yields `Some`.
pub(super) fn present<'de, D>(d: D) -> Result<Option<DeleteCount>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(d).map(|v| Some(DeleteCount::from(v)))
}

pub(super) fn keys<'de, D>(d: D) -> Result<Vec<Key>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(d)? else {
        debug!("Keys is not an array, treating as empty");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(_) => serde_json::from_value::<Key>(item)
                .map_err(|e| debug!("skipping malformed key: {e}"))
                .ok(),
            other => {
                debug!(value = ?other, "skipping non-object key record");
                None
            }
        })
        .collect())
}

pub(super) fn modes<'de, D>(d: D) -> Result<Vec<Mode>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .map(|item| Mode {
            name: match item {
                Value::Object(fields) => fields.get("Name").and_then(label_text),
                other => label_text(other),
            },
        })
        .collect())
}

//! Response envelopes.
//!
//! The API is not consistent about where it puts the payload. A list may
//! arrive bare, under a resource key, under `data`, or inside a paginator
//! (`{ "data": { "data": [...] } }`); single resources arrive bare, under a
//! resource key or under `data`. These helpers take the body apart once so
//! the services never have to.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::api::error::DecodeError;

/// Extract a list from `body`, trying each of `keys` and then `data` at every
/// level. A `null` body or a body with no list in it reads as empty.
///
/// # Errors
///
/// Returns an error when the list is found but an element does not decode.
pub fn list<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<Vec<T>, DecodeError> {
    if body.is_null() {
        return Ok(Vec::new());
    }

    match find_list(body, keys) {
        Some(items) => Ok(serde_json::from_value(items)?),
        None => {
            warn!(?keys, "response did not contain a list, treating it as empty");

            Ok(Vec::new())
        }
    }
}

fn find_list(value: Value, keys: &[&str]) -> Option<Value> {
    match value {
        Value::Array(_) => Some(value),
        Value::Object(mut map) => keys
            .iter()
            .chain(&["data"])
            .find_map(|key| map.remove(*key))
            .and_then(|inner| find_list(inner, keys)),
        _ => None,
    }
}

/// Extract a single resource from `body`, trying each of `keys` and then an
/// object under `data`; otherwise the body itself is the resource.
///
/// # Errors
///
/// Returns an error when the body is empty or the resource does not decode.
pub fn item<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<T, DecodeError> {
    let value = match body {
        Value::Null => return Err(DecodeError::Missing("response body")),
        Value::Object(mut map) => {
            let keyed = keys
                .iter()
                .find_map(|key| map.remove(*key).filter(Value::is_object));

            match keyed {
                Some(inner) => inner,
                None if map.get("data").is_some_and(Value::is_object) => {
                    map.remove("data").unwrap_or(Value::Null)
                }
                None => Value::Object(map),
            }
        }
        other => other,
    };

    Ok(serde_json::from_value(value)?)
}

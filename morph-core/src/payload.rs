//! Payload — the ordered field/value mapping an instance is built from.

use crate::error::CastError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Ordered mapping from field name to value.
///
/// Built on `serde_json::Map` with `preserve_order`, so the insertion order
/// of the caller's fields survives filtering and construction.
pub type Payload = serde_json::Map<String, Value>;

/// Normalize a raw property value into a [`Payload`].
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` count as empty and yield an
/// empty payload. A non-empty object is taken as-is. Anything else is
/// rejected with [`CastError::InvalidPayload`].
pub fn payload_from_value(property: &str, value: &Value) -> Result<Payload, CastError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        v if is_empty_value(v) => Ok(Payload::new()),
        v => Err(CastError::InvalidPayload {
            property: property.to_owned(),
            kind: kind_of(v),
        }),
    }
}

/// Whether a value is "empty" in the loose sense used for raw payloads.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// JSON kind name of a value, for diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Deserialize a typed value from a payload.
///
/// Convenience for [`FromPayload`](crate::FromPayload) implementations that
/// derive `Deserialize`.
pub fn deserialize<T: DeserializeOwned>(payload: Payload) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(payload))
}

/// Serialize a typed value into a payload.
///
/// Values that do not serialize to a JSON object yield an empty payload.
pub fn serialize<T: Serialize>(value: &T) -> Payload {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Payload::new(),
    }
}

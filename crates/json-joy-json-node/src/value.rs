//! Conversion of typed input into the dynamic [`Value`] shape.

use serde::Serialize;
use serde_json::Value;

/// Convert any serializable input into a [`Value`].
///
/// Primitive values and existing `Value`s pass through unchanged; structs,
/// maps and sequences are converted by their `Serialize` implementation, so
/// `#[serde(...)]` attributes apply exactly as they would when encoding.
///
/// # Errors
///
/// Fails when the input cannot be represented as JSON (for example a map with
/// non-string keys, or a [`Node`](crate::Node) that carries an error).
pub fn coerce<T: Serialize + ?Sized>(input: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(input)
}

/// Name of the value's JSON type, as used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

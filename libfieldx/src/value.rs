//! Extracted field values.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// A set of extracted fields, keyed by field name.
///
/// Every extractor produces this shape. The key/value tokenizer only ever
/// produces string values; the JSON extractor may produce any JSON value.
pub type Fields = Map<String, Value>;

/// Convert tokenizer output into `Fields`.
pub fn fields_from_pairs(pairs: HashMap<String, String>) -> Fields {
    pairs
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}

/// Short name of a JSON value's type, for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render a field value as plain text.
///
/// Strings are returned without quotes; everything else is compact JSON.
pub fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

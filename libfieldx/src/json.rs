//! JSON object extractor.

use crate::error::{ParseError, Result};
use crate::value::{kind_name, Fields};
use serde_json::Value;

/// Decode a JSON object into fields.
///
/// Returns `Ok(None)` for a literal `null`, which callers treat as "nothing
/// extracted" rather than as a failure. Any other non-object value is an
/// error since it has no field names.
pub fn parse_json_object(raw: &str) -> Result<Option<Fields>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(fields) => Ok(Some(fields)),
        Value::Null => Ok(None),
        other => Err(ParseError::NotAnObject(kind_name(&other))),
    }
}

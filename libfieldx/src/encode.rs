//! Encoders for extracted fields.
//!
//! - `Json`: one compact JSON object.
//! - `JsonPretty`: an indented JSON object.
//! - `Kvp`: `key=value` pairs separated by spaces, escaped so that the
//!   tokenizer reads back the same keys and values.

use crate::tokenizer::is_special;
use crate::value::{text_value, Fields};
use serde_json::Value;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    JsonPretty,
    Kvp,
}

/// Encode fields in the given format.
pub fn encode(fields: &Fields, format: Format) -> String {
    match format {
        Format::Json => Value::Object(fields.clone()).to_string(),
        Format::JsonPretty => format!("{:#}", Value::Object(fields.clone())),
        Format::Kvp => encode_kvp(fields),
    }
}

/// Non-string values are written as compact JSON text. An empty value only
/// reads back as empty when it is last, since the tokenizer drops a key
/// whose value is missing before the next key.
fn encode_kvp(fields: &Fields) -> String {
    let mut out = String::new();
    for (key, value) in fields {
        if !out.is_empty() {
            out.push(' ');
        }
        push_escaped(&mut out, key);
        out.push('=');
        push_escaped(&mut out, &text_value(value));
    }
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if is_special(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

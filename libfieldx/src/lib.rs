//! Field extraction for semi-structured log lines.
//!
//! Turns a line such as `level=info msg="disk full" code: 7` or
//! `{"level": "info"}` into a map of named fields.
//!
//! # Extractors
//!
//! 1. **`kvp`**: a forgiving key/value tokenizer. It never fails; partial
//!    input produces best-effort pairs.
//!
//! 2. **`json`**: decodes a JSON object and fails on anything else.
//!
//! 3. **`auto`**: tries `json`, then `kvp`, and returns the first result.
//!
//! Extractors live in a [`Registry`] keyed by their string identifier. The
//! [`transform`] module applies one to a field of a row, and [`encode()`]
//! renders the result.

mod encode;
mod error;
mod json;
pub mod registry;
mod tokenizer;
pub mod transform;
mod value;

pub use encode::{encode, Format};
pub use error::{ParseError, Result};
pub use json::parse_json_object;
pub use registry::{ExtractorId, FieldExtractor, Registry};
pub use tokenizer::parse_key_value_pairs;
pub use transform::{extract_row, ExtractOptions};
pub use value::{fields_from_pairs, kind_name, text_value, Fields};

/// Extract fields from `raw` with one of the standard extractors.
///
/// `Ok(None)` means nothing was extracted (JSON `null`, or `auto` with no
/// strategy succeeding).
///
/// # Example
///
/// ```
/// use libfieldx::extract;
///
/// let fields = extract("a=1,b=2", "auto").unwrap().unwrap();
/// assert_eq!(fields["a"], "1");
/// ```
pub fn extract(raw: &str, id: &str) -> Result<Option<Fields>> {
    Registry::standard().extract(id, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_dispatch() {
        assert_eq!(
            extract(r#"{"x":1}"#, "auto").unwrap().unwrap()["x"],
            json!(1)
        );
        assert_eq!(extract("x=1", "kvp").unwrap().unwrap()["x"], json!("1"));
        assert!(extract("x=1", "json").is_err());
        assert!(matches!(
            extract("x=1", "yaml"),
            Err(ParseError::UnknownExtractor(_))
        ));
    }
}

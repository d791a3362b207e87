//! YAML output: rows become a sequence of mappings.
//!
//! JSON values map directly onto YAML: null, bool, number, string, sequence,
//! and mapping. Strings that would read back as another type are quoted by
//! the encoder.

use libfieldx::Fields;

/// Encode rows as a YAML sequence.
pub fn encode_rows(rows: &[Fields]) -> Result<String, String> {
    serde_yaml::to_string(rows).map_err(|e| format!("YAML encode error: {}", e))
}

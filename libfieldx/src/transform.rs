//! Row transformer: extract fields out of one field of a row.

use crate::registry::{ExtractorId, Registry};
use crate::value::Fields;
use serde_json::Value;
use tracing::debug;

/// Which field to read, how to parse it, and what to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Name of the string field holding the raw text.
    pub source: String,
    /// Registry id of the extractor.
    pub format: String,
    /// Keep only the extracted fields instead of merging them into the row.
    pub replace: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            source: "line".to_string(),
            format: ExtractorId::Auto.as_str().to_string(),
            replace: false,
        }
    }
}

/// Apply the configured extractor to `row[options.source]`.
///
/// The row comes back unchanged when the source field is missing or not a
/// string, when the extractor is unknown or fails, or when it extracts
/// nothing. Extracted fields overwrite same-named fields of the row.
pub fn extract_row(row: &Fields, options: &ExtractOptions, registry: &Registry) -> Fields {
    let Some(raw) = row.get(&options.source).and_then(Value::as_str) else {
        debug!(source = %options.source, "source field missing or not a string");
        return row.clone();
    };

    let extracted = match registry.extract(&options.format, raw) {
        Ok(Some(fields)) => fields,
        Ok(None) => {
            debug!(format = %options.format, "nothing extracted");
            return row.clone();
        }
        Err(e) => {
            debug!(format = %options.format, error = %e, "extraction failed");
            return row.clone();
        }
    };

    if options.replace {
        return extracted;
    }

    let mut merged = row.clone();
    merged.extend(extracted);
    merged
}

//! Error types for field extraction.

use thiserror::Error;

/// Result type for field extraction operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Error type for field extraction.
///
/// The key/value tokenizer never fails; these come from the JSON extractor
/// and from registry lookups.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input is not well-formed JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed JSON whose top-level value is not an object.
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// Extractor identifier not present in the registry.
    #[error("Unknown extractor \"{0}\"")]
    UnknownExtractor(String),
}

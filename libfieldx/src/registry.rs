//! Registry of field extractors.
//!
//! Each extractor is a plain descriptor: a stable identifier, a display
//! name, a one-line description, and a parse function. The standard registry
//! holds the three built-in strategies:
//!
//! - `json`: decode a JSON object.
//! - `kvp`: tokenize `a=b, c: d` pairs.
//! - `auto`: `json`, falling back to `kvp`.
//!
//! Further strategies can be registered under new identifiers.

use crate::error::{ParseError, Result};
use crate::json::parse_json_object;
use crate::tokenizer::parse_key_value_pairs;
use crate::value::{fields_from_pairs, Fields};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Identifiers of the built-in extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorId {
    Json,
    KeyValues,
    Auto,
}

impl ExtractorId {
    /// All built-in identifiers, in registry order.
    pub const ALL: [ExtractorId; 3] = [
        ExtractorId::Json,
        ExtractorId::KeyValues,
        ExtractorId::Auto,
    ];

    /// The stable string identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractorId::Json => "json",
            ExtractorId::KeyValues => "kvp",
            ExtractorId::Auto => "auto",
        }
    }
}

impl fmt::Display for ExtractorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractorId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        ExtractorId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParseError::UnknownExtractor(s.to_string()))
    }
}

/// Signature shared by all extractors.
///
/// `Ok(None)` means the input decoded to nothing (a JSON `null`).
pub type ParseFn = fn(&str) -> Result<Option<Fields>>;

/// An extraction strategy.
#[derive(Clone, Copy)]
pub struct FieldExtractor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub parse: ParseFn,
}

impl FieldExtractor {
    /// Run this extractor on a raw string.
    pub fn extract(&self, raw: &str) -> Result<Option<Fields>> {
        (self.parse)(raw)
    }
}

impl fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldExtractor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Decode a JSON object string.
pub const JSON: FieldExtractor = FieldExtractor {
    id: "json",
    name: "JSON",
    description: "Parse JSON string",
    parse: parse_json_object,
};

/// Tokenize key/value pairs.
pub const KEY_VALUES: FieldExtractor = FieldExtractor {
    id: "kvp",
    name: "Key+value pairs",
    description: "Look for a=b, c: d values in the line",
    parse: parse_kvp,
};

/// Try each of `AUTO_ORDER` in turn.
pub const AUTO: FieldExtractor = FieldExtractor {
    id: "auto",
    name: "Auto",
    description: "parse new fields automatically",
    parse: parse_auto,
};

/// Strategies tried by `auto`, in order.
const AUTO_ORDER: [FieldExtractor; 2] = [JSON, KEY_VALUES];

fn parse_kvp(raw: &str) -> Result<Option<Fields>> {
    Ok(Some(fields_from_pairs(parse_key_value_pairs(raw))))
}

fn parse_auto(raw: &str) -> Result<Option<Fields>> {
    for extractor in &AUTO_ORDER {
        match extractor.extract(raw) {
            Ok(Some(fields)) => return Ok(Some(fields)),
            Ok(None) => debug!(extractor = extractor.id, "null result, trying next"),
            Err(e) => debug!(extractor = extractor.id, error = %e, "failed, trying next"),
        }
    }
    Ok(None)
}

/// Extractors keyed by identifier, listed in registration order.
#[derive(Debug, Clone)]
pub struct Registry {
    extractors: HashMap<&'static str, FieldExtractor>,
    order: Vec<&'static str>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// The built-in `json`, `kvp`, and `auto` extractors.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(JSON);
        registry.register(KEY_VALUES);
        registry.register(AUTO);
        registry
    }

    /// Add an extractor. One with the same id is replaced in place.
    pub fn register(&mut self, extractor: FieldExtractor) {
        if self.extractors.insert(extractor.id, extractor).is_none() {
            self.order.push(extractor.id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&FieldExtractor> {
        self.extractors.get(id)
    }

    /// Look up an extractor, failing for unknown ids.
    pub fn require(&self, id: &str) -> Result<&FieldExtractor> {
        self.get(id)
            .ok_or_else(|| ParseError::UnknownExtractor(id.to_string()))
    }

    pub fn list(&self) -> impl Iterator<Item = &FieldExtractor> {
        self.order.iter().filter_map(|id| self.extractors.get(id))
    }

    /// Run the extractor registered under `id`.
    pub fn extract(&self, id: &str, raw: &str) -> Result<Option<Fields>> {
        self.require(id)?.extract(raw)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

//! Catalog record types

use serde::{Deserialize, Serialize};

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Trailing path segment of `source_ref`. Not guaranteed unique.
    pub id: String,

    /// Display name as reported by the service
    pub name: String,

    /// The record's own detail URL
    #[serde(rename = "url")]
    pub source_ref: String,
}

impl Record {
    /// Build a record from a name and its reference URL, deriving the id
    pub fn new(name: impl Into<String>, source_ref: impl Into<String>) -> Self {
        let source_ref = source_ref.into();
        Self {
            id: derive_id(&source_ref),
            name: name.into(),
            source_ref,
        }
    }
}

/// Expanded attributes of a single record, fetched lazily on selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// Category names in the order the service lists them
    pub type_names: Vec<String>,
}

impl DetailRecord {
    /// Type names joined for display, e.g. `grass, poison`
    pub fn types_display(&self) -> String {
        self.type_names.join(", ")
    }
}

/// Last non-empty path segment of a reference URL.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `25`. A URL with no
/// non-empty segment yields an empty string.
pub fn derive_id(source_ref: &str) -> String {
    source_ref
        .split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or_default()
        .to_string()
}

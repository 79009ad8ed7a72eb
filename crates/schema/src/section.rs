//! Sections: named, independently collapsible groups of fields.

use serde::{Deserialize, Serialize};

use crate::field::SchemaField;

/// A named group of fields. List order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSection {
    pub name: String,
    #[serde(default = "default_expanded")]
    pub is_expanded: bool,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

fn default_expanded() -> bool {
    true
}

impl SchemaSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_expanded: true,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<SchemaField>) -> Self {
        self.fields = fields;
        self
    }

    /// The key used in flattened column headers: lowercase with whitespace
    /// collapsed to underscores (`"Basic Information"` → `"basic_information"`).
    pub fn storage_key(&self) -> String {
        self.name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }
}

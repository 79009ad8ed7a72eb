//! Display formatting of stored values.
//!
//! Used by dashboard listings and the chat recommendation cards. Summaries
//! only; deep display of structured values is the form renderer's job in
//! read-only mode, not this module's.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::field::SchemaField;
use crate::visit::{visit, FieldVisitor};

/// Format a stored value for display according to its field definition.
///
/// A missing definition or a null/missing value renders as `"N/A"`. An enum
/// value that is no longer a member of the current options renders as
/// `"Invalid option"`, which flags drift between stored data and a
/// retroactively edited schema instead of crashing the UI.
pub fn render_value(value: Option<&Value>, field: Option<&SchemaField>) -> String {
    let (Some(value), Some(field)) = (value, field) else {
        return "N/A".to_string();
    };
    if value.is_null() {
        return "N/A".to_string();
    }

    visit(field, &mut DisplayRender { value })
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

struct DisplayRender<'a> {
    value: &'a Value,
}

impl FieldVisitor for DisplayRender<'_> {
    type Output = String;

    fn text(&mut self, _field: &SchemaField) -> String {
        scalar_string(self.value)
    }

    fn number(&mut self, _field: &SchemaField) -> String {
        scalar_string(self.value)
    }

    fn boolean(&mut self, _field: &SchemaField) -> String {
        match self.value {
            Value::Bool(true) => "Yes".to_string(),
            Value::Bool(false) => "No".to_string(),
            other => scalar_string(other),
        }
    }

    fn enumeration(&mut self, _field: &SchemaField, options: &[String]) -> String {
        match self.value {
            Value::String(s) if options.iter().any(|o| o == s) => s.clone(),
            _ => "Invalid option".to_string(),
        }
    }

    fn array(&mut self, _field: &SchemaField, _element: Option<&SchemaField>) -> String {
        let Value::Array(items) = self.value else {
            return scalar_string(self.value);
        };
        if items.iter().any(Value::is_object) {
            return format!("{} items", items.len());
        }
        items.iter().map(scalar_string).collect::<Vec<_>>().join(", ")
    }

    fn object(
        &mut self,
        _field: &SchemaField,
        fields: Option<&BTreeMap<String, SchemaField>>,
    ) -> String {
        // Count of declared sub-fields; fall back to the value's own keys for
        // a definition that lost its sub-structure.
        let count = fields
            .map(BTreeMap::len)
            .or_else(|| self.value.as_object().map(serde_json::Map::len))
            .unwrap_or(0);
        format!("{count} properties")
    }
}

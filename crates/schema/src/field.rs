//! Field definitions: the tagged union at the center of the schema model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use eduforge_core::{DomainError, DomainResult};

/// The type of a schema field.
///
/// Exactly one of the structured variants carries extra shape on the owning
/// [`SchemaField`]: `Enum` has `options`, `Array` has `array_type`, `Object`
/// has `fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Array,
    Object,
    Enum,
}

impl FieldType {
    /// Parse a type string from external input.
    ///
    /// Total: unrecognized strings fall back to `Text` rather than failing,
    /// so a stale or hand-edited stored schema still loads. Callers that care
    /// can log the coercion.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            "enum" => Self::Enum,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Enum => "enum",
        }
    }
}

/// One field definition inside a section (or nested inside another field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Machine-safe key, unique within its parent scope.
    pub name: String,
    /// Human-readable display string.
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Allowed values; present only when `field_type == Enum`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Element definition; present only when `field_type == Array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_type: Option<Box<SchemaField>>,
    /// Nested field definitions; present only when `field_type == Object`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, SchemaField>>,
}

impl SchemaField {
    /// Plain field constructor (no sub-structure).
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            options: None,
            array_type: None,
            fields: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_element(mut self, element: SchemaField) -> Self {
        self.array_type = Some(Box::new(element));
        self
    }

    pub fn with_fields(mut self, fields: BTreeMap<String, SchemaField>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Enforce the shape invariant: exactly the sub-structure matching
    /// `field_type` is populated, recursively.
    pub fn validate_shape(&self) -> DomainResult<()> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DomainError::schema_integrity(format!(
                "field name {:?} is not machine-safe",
                self.name
            )));
        }

        let expect = |cond: bool, what: &str| -> DomainResult<()> {
            if cond {
                Ok(())
            } else {
                Err(DomainError::schema_integrity(format!(
                    "field \"{}\" of type {} {}",
                    self.name,
                    self.field_type.as_str(),
                    what
                )))
            }
        };

        match self.field_type {
            FieldType::Enum => {
                expect(self.options.is_some(), "must declare options")?;
                expect(self.array_type.is_none() && self.fields.is_none(), "must declare only options")?;
            }
            FieldType::Array => {
                expect(self.array_type.is_some(), "must declare an element type")?;
                expect(self.options.is_none() && self.fields.is_none(), "must declare only an element type")?;
                if let Some(element) = &self.array_type {
                    element.validate_shape()?;
                }
            }
            FieldType::Object => {
                expect(self.fields.is_some(), "must declare nested fields")?;
                expect(self.options.is_none() && self.array_type.is_none(), "must declare only nested fields")?;
                if let Some(fields) = &self.fields {
                    for nested in fields.values() {
                        nested.validate_shape()?;
                    }
                }
            }
            FieldType::Text | FieldType::Number | FieldType::Boolean => {
                expect(
                    self.options.is_none() && self.array_type.is_none() && self.fields.is_none(),
                    "must not declare sub-structure",
                )?;
            }
        }

        Ok(())
    }
}

/// A field as persisted in the flat storage shape: the field definition
/// stamped with the name of the section it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatField {
    pub section: String,
    #[serde(flatten)]
    pub field: SchemaField,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_type_string_defaults_to_text() {
        assert_eq!(FieldType::parse("number"), FieldType::Number);
        assert_eq!(FieldType::parse("ENUM"), FieldType::Enum);
        assert_eq!(FieldType::parse("select"), FieldType::Text);
        assert_eq!(FieldType::parse(""), FieldType::Text);
    }

    #[test]
    fn enum_without_options_fails_shape_check() {
        let field = SchemaField::new("level", "Level", FieldType::Enum);
        let err = field.validate_shape().unwrap_err();
        assert!(matches!(err, DomainError::SchemaIntegrity(_)));
    }

    #[test]
    fn text_with_options_fails_shape_check() {
        let field = SchemaField::new("title", "Title", FieldType::Text)
            .with_options(vec!["A".to_string()]);
        assert!(field.validate_shape().is_err());
    }

    #[test]
    fn nested_shape_violations_are_caught() {
        let bad_element = SchemaField::new("entry", "Entry", FieldType::Object);
        let field = SchemaField::new("entries", "Entries", FieldType::Array).with_element(bad_element);
        assert!(field.validate_shape().is_err());
    }

    #[test]
    fn field_name_must_be_machine_safe() {
        let field = SchemaField::new("program name", "Program Name", FieldType::Text);
        assert!(field.validate_shape().is_err());
    }

    #[test]
    fn flat_field_serializes_section_alongside_field_keys() {
        let flat = FlatField {
            section: "Basic Information".to_string(),
            field: SchemaField::new("programName", "Program Name", FieldType::Text).required(),
        };
        let json = serde_json::to_value(&flat).unwrap();
        assert_eq!(json["section"], "Basic Information");
        assert_eq!(json["name"], "programName");
        assert_eq!(json["type"], "text");
        assert_eq!(json["required"], true);
    }
}

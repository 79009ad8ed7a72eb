//! Form state: the record under edit.
//!
//! A JSON tree shaped `data[section_key][field_name]`, seeded entirely from
//! default values so every control is bound to a concrete value from the
//! start. All reads and writes go through [`ValuePath`]s that are checked
//! against the schema: a write to a path the schema does not describe is an
//! error, never a silent insert.

use serde_json::{Map, Value};

use eduforge_core::{DomainError, DomainResult};
use eduforge_schema::{check_value, default_value, BuilderSchema, FieldType, SchemaField};

use crate::path::{PathSegment, ValuePath};

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: BuilderSchema,
    root: Value,
}

impl FormState {
    /// Seed a fresh record: every declared field starts at its default value.
    pub fn new(schema: &BuilderSchema) -> Self {
        let mut root = Map::new();
        for section in &schema.sections {
            let mut section_map = Map::new();
            for field in &section.fields {
                section_map.insert(field.name.clone(), default_value(field));
            }
            root.insert(section.storage_key(), Value::Object(section_map));
        }
        Self {
            schema: schema.clone(),
            root: Value::Object(root),
        }
    }

    /// Wrap an existing record (edit flow). The data is taken as stored;
    /// validation against the current schema happens at submit.
    pub fn from_data(schema: &BuilderSchema, data: Value) -> Self {
        Self {
            schema: schema.clone(),
            root: data,
        }
    }

    pub fn data(&self) -> &Value {
        &self.root
    }

    pub fn into_data(self) -> Value {
        self.root
    }

    /// Resolve a path to the field definition it addresses.
    ///
    /// The first two segments are section key and field name; deeper segments
    /// must step through arrays by index and objects by declared field name.
    pub fn resolve_field(&self, path: &ValuePath) -> DomainResult<&SchemaField> {
        let [PathSegment::Field(section_key), PathSegment::Field(field_name), rest @ ..] =
            path.segments()
        else {
            return Err(DomainError::validation(format!(
                "path \"{path}\" must start with section.field"
            )));
        };

        let section = self
            .schema
            .sections
            .iter()
            .find(|s| s.storage_key() == *section_key)
            .ok_or_else(|| DomainError::validation(format!("unknown section \"{section_key}\"")))?;
        let mut field = section
            .fields
            .iter()
            .find(|f| f.name == *field_name)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown field \"{field_name}\" in section \"{}\"",
                    section.name
                ))
            })?;

        for segment in rest {
            field = match (field.field_type, segment) {
                (FieldType::Array, PathSegment::Index(_)) => {
                    field.array_type.as_deref().ok_or_else(|| {
                        DomainError::schema_integrity(format!(
                            "array field \"{}\" has no element type",
                            field.name
                        ))
                    })?
                }
                (FieldType::Object, PathSegment::Field(name)) => field
                    .fields
                    .as_ref()
                    .and_then(|fields| fields.get(name))
                    .ok_or_else(|| {
                        DomainError::validation(format!(
                            "field \"{}\" has no nested field \"{name}\"",
                            field.name
                        ))
                    })?,
                _ => {
                    return Err(DomainError::validation(format!(
                        "segment \"{segment}\" does not fit field \"{}\" of type {}",
                        field.name,
                        field.field_type.as_str()
                    )));
                }
            };
        }

        Ok(field)
    }

    pub fn get(&self, path: &ValuePath) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.segments() {
            current = match segment {
                PathSegment::Field(name) => current.as_object()?.get(name)?,
                PathSegment::Index(i) => current.as_array()?.get(*i)?,
            };
        }
        Some(current)
    }

    /// Write a value at a schema-validated path.
    ///
    /// Input coercion happens here, before anything reaches the tree: a
    /// number control's empty string becomes null (never `0`, never NaN) and
    /// numeric strings become numbers; an enum value outside the declared
    /// options is rejected even though the select control cannot produce one
    /// (bulk paths can inject).
    pub fn set(&mut self, path: &ValuePath, value: Value) -> DomainResult<()> {
        let field = self.resolve_field(path)?;
        let coerced = coerce_input(field, value)?;
        let slot = self.slot_mut(path)?;
        *slot = coerced;
        Ok(())
    }

    /// Append a default-seeded element to the array at `path`.
    /// Returns the new element's index.
    pub fn push_element(&mut self, path: &ValuePath) -> DomainResult<usize> {
        let field = self.resolve_field(path)?;
        if field.field_type != FieldType::Array {
            return Err(DomainError::validation(format!(
                "field at \"{path}\" is not an array"
            )));
        }
        let seed = field
            .array_type
            .as_deref()
            .map(default_value)
            .ok_or_else(|| {
                DomainError::schema_integrity(format!(
                    "array field \"{}\" has no element type",
                    field.name
                ))
            })?;

        let slot = self.slot_mut(path)?;
        let items = slot
            .as_array_mut()
            .ok_or_else(|| DomainError::validation(format!("value at \"{path}\" is not an array")))?;
        items.push(seed);
        Ok(items.len() - 1)
    }

    /// Remove element `index`; subsequent elements shift down (their paths
    /// re-index automatically since addressing is positional).
    pub fn remove_element(&mut self, path: &ValuePath, index: usize) -> DomainResult<()> {
        let field = self.resolve_field(path)?;
        if field.field_type != FieldType::Array {
            return Err(DomainError::validation(format!(
                "field at \"{path}\" is not an array"
            )));
        }
        let slot = self.slot_mut(path)?;
        let items = slot
            .as_array_mut()
            .ok_or_else(|| DomainError::validation(format!("value at \"{path}\" is not an array")))?;
        if index >= items.len() {
            return Err(DomainError::validation(format!(
                "no element {index} in array at \"{path}\" (len {})",
                items.len()
            )));
        }
        items.remove(index);
        Ok(())
    }

    /// Required/enum/number checks over the whole record. Advisory at submit
    /// time: the record is submitted as one blob or not at all.
    pub fn validate_submit(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for section in &self.schema.sections {
            let section_value = self
                .root
                .as_object()
                .and_then(|root| root.get(&section.storage_key()));
            for field in &section.fields {
                let value = section_value
                    .and_then(Value::as_object)
                    .and_then(|s| s.get(&field.name));
                errors.extend(check_value(field, &section.name, value));
            }
        }
        errors
    }

    fn slot_mut(&mut self, path: &ValuePath) -> DomainResult<&mut Value> {
        let mut current = &mut self.root;
        for segment in path.segments() {
            current = match segment {
                PathSegment::Field(name) => current
                    .as_object_mut()
                    .and_then(|map| map.get_mut(name))
                    .ok_or_else(|| {
                        DomainError::validation(format!("no value at segment \"{name}\" of \"{path}\""))
                    })?,
                PathSegment::Index(i) => {
                    let len = current.as_array().map_or(0, Vec::len);
                    current
                        .as_array_mut()
                        .and_then(|items| items.get_mut(*i))
                        .ok_or_else(|| {
                            DomainError::validation(format!(
                                "no element {i} in array at \"{path}\" (len {len})"
                            ))
                        })?
                }
            };
        }
        Ok(current)
    }
}

fn coerce_input(field: &SchemaField, value: Value) -> DomainResult<Value> {
    match field.field_type {
        FieldType::Number => match value {
            Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
            Value::String(s) => {
                let parsed: f64 = s.trim().parse().map_err(|_| {
                    DomainError::validation(format!(
                        "field \"{}\" expects a number, got \"{s}\"",
                        field.label
                    ))
                })?;
                Ok(serde_json::Number::from_f64(parsed)
                    .map(Value::Number)
                    .unwrap_or(Value::Null))
            }
            Value::Number(_) | Value::Null => Ok(value),
            other => Err(DomainError::validation(format!(
                "field \"{}\" expects a number, got {other}",
                field.label
            ))),
        },
        FieldType::Enum => match &value {
            Value::String(s) if s.is_empty() => Ok(value),
            Value::String(s) => {
                let options = field.options.as_deref().unwrap_or(&[]);
                if options.iter().any(|o| o == s) {
                    Ok(value)
                } else {
                    Err(DomainError::validation(format!(
                        "\"{s}\" is not an allowed value for field \"{}\"",
                        field.label
                    )))
                }
            }
            _ => Err(DomainError::validation(format!(
                "field \"{}\" expects one of its options",
                field.label
            ))),
        },
        FieldType::Boolean => match value {
            Value::Bool(_) => Ok(value),
            other => Err(DomainError::validation(format!(
                "field \"{}\" expects a boolean, got {other}",
                field.label
            ))),
        },
        FieldType::Text | FieldType::Array | FieldType::Object => Ok(value),
    }
}

//! Default values and edge validation for stored values.
//!
//! Both are [`FieldVisitor`] implementations so the type dispatch lives in
//! one place. `check_value` is shared by form submit and bulk import; the
//! storage layer itself never validates.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::field::SchemaField;
use crate::visit::{visit, FieldVisitor};

/// Produce the seed value for a field.
///
/// Total over every field shape and never `Value::Null`: controlled inputs
/// and newly added array elements both rely on a concrete starting value.
pub fn default_value(field: &SchemaField) -> Value {
    visit(field, &mut DefaultValue)
}

struct DefaultValue;

impl FieldVisitor for DefaultValue {
    type Output = Value;

    fn text(&mut self, _field: &SchemaField) -> Value {
        json!("")
    }

    fn number(&mut self, _field: &SchemaField) -> Value {
        json!(0)
    }

    fn boolean(&mut self, _field: &SchemaField) -> Value {
        json!(false)
    }

    fn enumeration(&mut self, _field: &SchemaField, _options: &[String]) -> Value {
        json!("")
    }

    fn array(&mut self, _field: &SchemaField, _element: Option<&SchemaField>) -> Value {
        json!([])
    }

    fn object(
        &mut self,
        _field: &SchemaField,
        fields: Option<&BTreeMap<String, SchemaField>>,
    ) -> Value {
        let mut map = Map::new();
        if let Some(fields) = fields {
            for (name, nested) in fields {
                map.insert(name.clone(), default_value(nested));
            }
        }
        Value::Object(map)
    }
}

/// A value is "missing" when absent, null, or a blank string. Required-field
/// checks and type checks both treat missing the same way.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Validate one stored value against its field definition.
///
/// Returns human-readable error strings (empty when the value is fine):
/// required-but-missing, enum member drift, and non-numeric numbers. Other
/// types have no edge checks. `section` is the owning section's display name,
/// used in the required-field message.
pub fn check_value(field: &SchemaField, section: &str, value: Option<&Value>) -> Vec<String> {
    if is_missing(value) {
        if field.required {
            return vec![format!(
                "Missing required field \"{}\" in section \"{}\"",
                field.label, section
            )];
        }
        return Vec::new();
    }

    let mut check = ValueCheck {
        value: value.unwrap_or(&Value::Null),
        errors: Vec::new(),
    };
    visit(field, &mut check);
    check.errors
}

struct ValueCheck<'a> {
    value: &'a Value,
    errors: Vec<String>,
}

impl ValueCheck<'_> {
    fn display_value(&self) -> String {
        match self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl FieldVisitor for ValueCheck<'_> {
    type Output = ();

    fn text(&mut self, _field: &SchemaField) {}

    fn number(&mut self, field: &SchemaField) {
        let numeric = match self.value {
            Value::Number(_) => true,
            Value::String(s) => s.trim().parse::<f64>().is_ok(),
            _ => false,
        };
        if !numeric {
            self.errors.push(format!(
                "Field \"{}\" must be a number, got \"{}\"",
                field.label,
                self.display_value()
            ));
        }
    }

    fn boolean(&mut self, _field: &SchemaField) {}

    fn enumeration(&mut self, field: &SchemaField, options: &[String]) {
        let member = match self.value {
            Value::String(s) => options.iter().any(|o| o == s),
            _ => false,
        };
        if !member {
            self.errors.push(format!(
                "Invalid value \"{}\" for field \"{}\": allowed values are {}",
                self.display_value(),
                field.label,
                options.join(", ")
            ));
        }
    }

    fn array(&mut self, _field: &SchemaField, _element: Option<&SchemaField>) {}

    fn object(&mut self, _field: &SchemaField, _fields: Option<&BTreeMap<String, SchemaField>>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn deep_field() -> SchemaField {
        let contact = SchemaField::new("contact", "Contact", FieldType::Object).with_fields(
            BTreeMap::from([
                ("email".to_string(), SchemaField::new("email", "Email", FieldType::Text)),
                ("age".to_string(), SchemaField::new("age", "Age", FieldType::Number)),
            ]),
        );
        let tags = SchemaField::new("tags", "Tags", FieldType::Array)
            .with_element(SchemaField::new("tag", "Tag", FieldType::Text));
        SchemaField::new("applicant", "Applicant", FieldType::Object).with_fields(BTreeMap::from([
            ("contact".to_string(), contact),
            ("tags".to_string(), tags),
            ("active".to_string(), SchemaField::new("active", "Active", FieldType::Boolean)),
        ]))
    }

    #[test]
    fn default_value_is_total_over_deep_nesting() {
        let value = default_value(&deep_field());
        assert_eq!(
            value,
            json!({
                "active": false,
                "contact": { "email": "", "age": 0 },
                "tags": [],
            })
        );
    }

    #[test]
    fn default_value_never_returns_null() {
        for ty in [
            FieldType::Text,
            FieldType::Number,
            FieldType::Boolean,
            FieldType::Array,
            FieldType::Object,
            FieldType::Enum,
        ] {
            let field = SchemaField::new("f", "F", ty);
            assert!(!default_value(&field).is_null(), "{ty:?} defaulted to null");
        }
    }

    #[test]
    fn required_missing_value_names_label_and_section() {
        let field = SchemaField::new("programName", "Program Name", FieldType::Text).required();
        let errors = check_value(&field, "Basic Information", None);
        assert_eq!(
            errors,
            vec!["Missing required field \"Program Name\" in section \"Basic Information\""]
        );
        // Blank strings count as missing too.
        assert_eq!(check_value(&field, "Basic Information", Some(&json!("  "))).len(), 1);
    }

    #[test]
    fn optional_missing_value_is_fine() {
        let field = SchemaField::new("notes", "Notes", FieldType::Text);
        assert!(check_value(&field, "Other", None).is_empty());
        assert!(check_value(&field, "Other", Some(&Value::Null)).is_empty());
    }

    #[test]
    fn enum_value_outside_options_cites_allowed_values() {
        let field = SchemaField::new("level", "Level", FieldType::Enum)
            .with_options(vec!["UG".to_string(), "PG".to_string()]);
        let errors = check_value(&field, "Program", Some(&json!("PHD")));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("PHD"));
        assert!(errors[0].contains("UG, PG"));
    }

    #[test]
    fn enum_member_passes() {
        let field = SchemaField::new("level", "Level", FieldType::Enum)
            .with_options(vec!["UG".to_string(), "PG".to_string()]);
        assert!(check_value(&field, "Program", Some(&json!("PG"))).is_empty());
    }

    #[test]
    fn number_accepts_numbers_and_numeric_strings() {
        let field = SchemaField::new("gpa", "GPA", FieldType::Number);
        assert!(check_value(&field, "Req", Some(&json!(3.5))).is_empty());
        assert!(check_value(&field, "Req", Some(&json!("3.5"))).is_empty());
        let errors = check_value(&field, "Req", Some(&json!("high")));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("GPA"));
    }
}

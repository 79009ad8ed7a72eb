//! Eligibility criteria: schema fields tagged with a comparison operator.
//!
//! These drive both the chat-time recommendation tool's parameter schema and
//! the filter the matching engine builds over stored program records.

use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// How a student's answer is compared against a program's stored value.
///
/// `Unknown` absorbs any unrecognized operator string from a stored schema;
/// the matching engine treats it as always-true (fail-open) and logs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonOperator {
    Equals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    #[serde(other)]
    Unknown,
}

/// Optional bounds used to validate the student-supplied answer itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

/// One eligibility criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    pub operator: ComparisonOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationBounds>,
}

impl EligibilityField {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
        operator: ComparisonOperator,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            operator,
            validation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_use_camel_case_on_the_wire() {
        let op: ComparisonOperator = serde_json::from_str("\"greaterThanOrEqual\"").unwrap();
        assert_eq!(op, ComparisonOperator::GreaterThanOrEqual);
        assert_eq!(
            serde_json::to_string(&ComparisonOperator::LessThan).unwrap(),
            "\"lessThan\""
        );
    }

    #[test]
    fn unrecognized_operator_deserializes_to_unknown() {
        let op: ComparisonOperator = serde_json::from_str("\"between\"").unwrap();
        assert_eq!(op, ComparisonOperator::Unknown);
    }
}

//! The root editing shape: an ordered list of sections.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use eduforge_core::{DomainError, DomainResult};

use crate::eligibility::EligibilityField;
use crate::field::SchemaField;
use crate::section::SchemaSection;

/// A tenant's editable schema: ordered sections of fields plus optional
/// eligibility criteria.
///
/// This is metadata only: it describes the shape program record `data` must
/// conform to, and never carries program data itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSchema {
    #[serde(default)]
    pub sections: Vec<SchemaSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility_criteria: Option<Vec<EligibilityField>>,
}

impl BuilderSchema {
    pub fn new(sections: Vec<SchemaSection>) -> Self {
        Self {
            sections,
            eligibility_criteria: None,
        }
    }

    /// The shape a freshly provisioned tenant starts from.
    pub fn with_default_section() -> Self {
        Self::new(vec![SchemaSection::new("Basic Information")])
    }

    pub fn with_eligibility(mut self, criteria: Vec<EligibilityField>) -> Self {
        self.eligibility_criteria = Some(criteria);
        self
    }

    /// Look up a field by section and field name.
    pub fn field(&self, section_name: &str, field_name: &str) -> Option<&SchemaField> {
        self.sections
            .iter()
            .find(|s| s.name == section_name)?
            .fields
            .iter()
            .find(|f| f.name == field_name)
    }

    /// Integrity check run at save time.
    ///
    /// Section names must be unique, field names must be unique across the
    /// whole schema (the flat storage shape keys on field name alone), and
    /// every field must carry exactly the sub-structure its type demands.
    pub fn validate(&self) -> DomainResult<()> {
        let mut section_names = BTreeSet::new();
        let mut field_names = BTreeSet::new();

        for section in &self.sections {
            if section.name.trim().is_empty() {
                return Err(DomainError::schema_integrity("section name cannot be empty"));
            }
            if !section_names.insert(section.name.as_str()) {
                return Err(DomainError::schema_integrity(format!(
                    "duplicate section name \"{}\"",
                    section.name
                )));
            }
            for field in &section.fields {
                field.validate_shape()?;
                if !field_names.insert(field.name.as_str()) {
                    return Err(DomainError::schema_integrity(format!(
                        "field name \"{}\" is used in more than one section",
                        field.name
                    )));
                }
            }
        }

        Ok(())
    }
}

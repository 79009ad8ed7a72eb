//! Converter between the section-grouped editing shape and the flat storage
//! shape persisted as tenant metadata.
//!
//! The storage contract is `Record<fieldName, SchemaField & {section}>`:
//! content-only. Section ordering and collapsed/expanded state are **not**
//! preserved across a round trip; only field content is.

use std::collections::BTreeMap;

use eduforge_core::{DomainError, DomainResult};

use crate::builder::BuilderSchema;
use crate::field::FlatField;
use crate::section::SchemaSection;

/// Section name assigned to flat entries that carry no section stamp.
pub const FALLBACK_SECTION: &str = "Other";

/// Flatten an edited schema into the storage shape.
///
/// Every field is copied and stamped with its owning section's name, merged
/// into one map keyed by field name. A field name repeated across sections is
/// a data-integrity error: the editing layer enforces global uniqueness, so
/// a collision here means corrupted metadata and is surfaced, never silently
/// resolved last-wins.
pub fn flatten(schema: &BuilderSchema) -> DomainResult<BTreeMap<String, FlatField>> {
    let mut flat = BTreeMap::new();

    for section in &schema.sections {
        for field in &section.fields {
            let entry = FlatField {
                section: section.name.clone(),
                field: field.clone(),
            };
            if flat.insert(field.name.clone(), entry).is_some() {
                return Err(DomainError::schema_integrity(format!(
                    "field name \"{}\" appears in more than one section",
                    field.name
                )));
            }
        }
    }

    Ok(flat)
}

/// Rebuild an editable schema from the storage shape.
///
/// Entries are grouped by their `section` stamp (blank stamps land in
/// [`FALLBACK_SECTION`]) and the stamp is dropped from each field. Sections
/// come back in name order with `is_expanded = true`; the storage shape is
/// content-only, so there is no original order or UI state to restore.
pub fn unflatten(flat: &BTreeMap<String, FlatField>) -> BuilderSchema {
    let mut grouped: BTreeMap<String, Vec<_>> = BTreeMap::new();

    for entry in flat.values() {
        let section = if entry.section.trim().is_empty() {
            FALLBACK_SECTION.to_string()
        } else {
            entry.section.clone()
        };
        grouped.entry(section).or_default().push(entry.field.clone());
    }

    BuilderSchema::new(
        grouped
            .into_iter()
            .map(|(name, fields)| SchemaSection::new(name).with_fields(fields))
            .collect(),
    )
}

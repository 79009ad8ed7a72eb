//! Program record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use eduforge_core::{ProgramId, TenantId};

/// One concrete data instance (e.g. a specific degree program).
///
/// `data` is nested JSON shaped like the tenant's schema:
/// `data[section_key][field_name]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: ProgramId,
    pub organization_id: TenantId,
    pub name: String,
    pub data: Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Program {
    /// Materialize a creation request into a stored record.
    pub fn create(organization_id: TenantId, new: NewProgram, now: DateTime<Utc>) -> Self {
        Self {
            id: ProgramId::new(),
            organization_id,
            name: new.name,
            data: new.data,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a stored field value by field name, searching every section of
    /// `data`. Field names are globally unique per the schema contract, so
    /// the first hit is the only hit.
    pub fn field_value(&self, field_name: &str) -> Option<&Value> {
        let sections = self.data.as_object()?;
        for section_value in sections.values() {
            if let Some(found) = section_value.as_object().and_then(|s| s.get(field_name)) {
                return Some(found);
            }
        }
        None
    }
}

/// A program creation request (one bulk-import row, or one form submit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProgram {
    pub name: String,
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_value_searches_across_sections() {
        let program = Program::create(
            TenantId::new(),
            NewProgram {
                name: "MSc AI".to_string(),
                data: json!({
                    "basic_information": { "programName": "MSc AI" },
                    "requirements": { "gpa": 3.5, "country": "USA" },
                }),
            },
            Utc::now(),
        );

        assert_eq!(program.field_value("gpa"), Some(&json!(3.5)));
        assert_eq!(program.field_value("programName"), Some(&json!("MSc AI")));
        assert_eq!(program.field_value("missing"), None);
    }

    #[test]
    fn created_programs_start_active() {
        let program = Program::create(
            TenantId::new(),
            NewProgram { name: "BSc CS".to_string(), data: json!({}) },
            Utc::now(),
        );
        assert!(program.is_active);
        assert_eq!(program.created_at, program.updated_at);
    }
}

//! Store wiring and tenant-scoped operations shared by all handlers.
//!
//! Persistence here is the in-memory twin of the storage seam; a relational
//! implementation of the store traits slots in without touching handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use eduforge_bulk::{build_template, import_batch, parse_csv_rows, BatchOutcome, RowFailure, Template};
use eduforge_core::{DomainError, DomainResult, ProgramId, TenantId};
use eduforge_forms::FormState;
use eduforge_matching::{match_programs, MatchOutcome};
use eduforge_programs::{
    InMemoryProgramStore, InMemorySchemaStore, NewProgram, Program, ProgramStore, SchemaStore,
    TenantSchema,
};
use eduforge_schema::{flatten, unflatten, BuilderSchema};

pub struct AppServices {
    schemas: Arc<InMemorySchemaStore>,
    programs: Arc<InMemoryProgramStore>,
}

/// Outcome of a bulk upload: either everything was created or nothing was.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportResult {
    Created(usize),
    Rejected(Vec<RowFailure>),
}

pub fn build_services() -> AppServices {
    AppServices {
        schemas: Arc::new(InMemorySchemaStore::new()),
        programs: Arc::new(InMemoryProgramStore::new()),
    }
}

impl AppServices {
    /// The tenant's schema in its editable shape, when configured.
    pub fn builder_schema(&self, tenant_id: TenantId) -> Option<BuilderSchema> {
        let stored = self.schemas.get(tenant_id)?;
        let mut schema = unflatten(&stored.fields);
        schema.eligibility_criteria = stored.eligibility_criteria;
        Some(schema)
    }

    /// Validate and persist a schema in its flat storage shape.
    /// Returns the number of stored fields.
    pub fn save_schema(&self, tenant_id: TenantId, schema: &BuilderSchema) -> DomainResult<usize> {
        schema.validate()?;
        let fields = flatten(schema)?;
        let count = fields.len();
        self.schemas.upsert(
            tenant_id,
            TenantSchema {
                fields,
                eligibility_criteria: schema.eligibility_criteria.clone(),
            },
        );
        Ok(count)
    }

    pub fn list_programs(&self, tenant_id: TenantId) -> Vec<Program> {
        self.programs.list(tenant_id)
    }

    pub fn get_program(&self, tenant_id: TenantId, id: ProgramId) -> Option<Program> {
        self.programs.get(tenant_id, id)
    }

    pub fn delete_program(&self, tenant_id: TenantId, id: ProgramId) -> bool {
        self.programs.remove(tenant_id, id)
    }

    /// Create one program record. The record's data is validated against the
    /// tenant's schema here, at the edge; storage itself never validates.
    pub fn create_program(&self, tenant_id: TenantId, new: NewProgram) -> DomainResult<Program> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("program name cannot be empty"));
        }
        if let Some(schema) = self.builder_schema(tenant_id) {
            let errors = FormState::from_data(&schema, new.data.clone()).validate_submit();
            if !errors.is_empty() {
                return Err(DomainError::validation(errors.join("; ")));
            }
        }

        let program = Program::create(tenant_id, new, Utc::now());
        self.programs.upsert(tenant_id, program.clone());
        Ok(program)
    }

    /// The upload template for the tenant's current schema.
    pub fn template(&self, tenant_id: TenantId) -> DomainResult<Template> {
        let schema = self
            .builder_schema(tenant_id)
            .ok_or_else(|| DomainError::not_configured("no schema defined for this organization"))?;
        Ok(build_template(&schema))
    }

    /// Validate a CSV upload and create every row, all-or-nothing.
    ///
    /// Row validation happens fully before any write; creates are issued one
    /// per row (the in-memory store makes them effectively atomic here; a
    /// transactional store would wrap them at the persistence boundary).
    pub fn import_programs(&self, tenant_id: TenantId, csv_bytes: &[u8]) -> DomainResult<ImportResult> {
        let schema = self
            .builder_schema(tenant_id)
            .ok_or_else(|| DomainError::not_configured("no schema defined for this organization"))?;

        let rows = parse_csv_rows(csv_bytes)?;
        match import_batch(&schema, &rows)? {
            BatchOutcome::Rejected(failures) => Ok(ImportResult::Rejected(failures)),
            BatchOutcome::Accepted(programs) => {
                let count = programs.len();
                for new in programs {
                    let program = Program::create(tenant_id, new, Utc::now());
                    self.programs.upsert(tenant_id, program);
                }
                Ok(ImportResult::Created(count))
            }
        }
    }

    /// Rank the tenant's programs against a student's answers.
    pub fn recommend(
        &self,
        tenant_id: TenantId,
        answers: &BTreeMap<String, Value>,
    ) -> DomainResult<MatchOutcome> {
        let stored = self
            .schemas
            .get(tenant_id)
            .ok_or_else(|| DomainError::not_configured("no schema defined for this organization"))?;
        let criteria = stored.eligibility_criteria.unwrap_or_default();
        match_programs(tenant_id, &criteria, answers, &stored.fields, &self.programs)
    }
}

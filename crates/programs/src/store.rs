//! Tenant-isolated storage seams.
//!
//! Relational persistence is an external collaborator; these traits are the
//! boundary, and the in-memory implementations back tests, dev, and the API
//! wiring. Every operation is keyed by tenant, which makes cross-tenant
//! access impossible by construction.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use eduforge_core::{ProgramId, TenantId};
use eduforge_schema::{EligibilityField, FlatField};

use crate::program::Program;

/// The persisted tenant metadata: the flattened schema plus eligibility
/// criteria. Content-only: no section order, no UI state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSchema {
    #[serde(default)]
    pub fields: BTreeMap<String, FlatField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility_criteria: Option<Vec<EligibilityField>>,
}

/// Tenant-isolated program record storage.
pub trait ProgramStore: Send + Sync {
    fn get(&self, tenant_id: TenantId, id: ProgramId) -> Option<Program>;
    fn upsert(&self, tenant_id: TenantId, program: Program);
    /// All programs for a tenant, newest-first by creation time.
    fn list(&self, tenant_id: TenantId) -> Vec<Program>;
    fn remove(&self, tenant_id: TenantId, id: ProgramId) -> bool;
    /// Clear all records for a tenant (offboarding / rebuild support).
    fn clear_tenant(&self, tenant_id: TenantId);
}

impl<S> ProgramStore for Arc<S>
where
    S: ProgramStore + ?Sized,
{
    fn get(&self, tenant_id: TenantId, id: ProgramId) -> Option<Program> {
        (**self).get(tenant_id, id)
    }

    fn upsert(&self, tenant_id: TenantId, program: Program) {
        (**self).upsert(tenant_id, program)
    }

    fn list(&self, tenant_id: TenantId) -> Vec<Program> {
        (**self).list(tenant_id)
    }

    fn remove(&self, tenant_id: TenantId, id: ProgramId) -> bool {
        (**self).remove(tenant_id, id)
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        (**self).clear_tenant(tenant_id)
    }
}

/// Tenant-isolated schema metadata storage.
pub trait SchemaStore: Send + Sync {
    fn get(&self, tenant_id: TenantId) -> Option<TenantSchema>;
    fn upsert(&self, tenant_id: TenantId, schema: TenantSchema);
    fn clear_tenant(&self, tenant_id: TenantId);
}

impl<S> SchemaStore for Arc<S>
where
    S: SchemaStore + ?Sized,
{
    fn get(&self, tenant_id: TenantId) -> Option<TenantSchema> {
        (**self).get(tenant_id)
    }

    fn upsert(&self, tenant_id: TenantId, schema: TenantSchema) {
        (**self).upsert(tenant_id, schema)
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        (**self).clear_tenant(tenant_id)
    }
}

/// In-memory program store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProgramStore {
    inner: RwLock<HashMap<(TenantId, ProgramId), Program>>,
}

impl InMemoryProgramStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgramStore for InMemoryProgramStore {
    fn get(&self, tenant_id: TenantId, id: ProgramId) -> Option<Program> {
        let map = self.inner.read().ok()?;
        map.get(&(tenant_id, id)).cloned()
    }

    fn upsert(&self, tenant_id: TenantId, program: Program) {
        if let Ok(mut map) = self.inner.write() {
            map.insert((tenant_id, program.id), program);
        }
    }

    fn list(&self, tenant_id: TenantId) -> Vec<Program> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut items: Vec<Program> = map
            .iter()
            .filter_map(|((t, _id), p)| if *t == tenant_id { Some(p.clone()) } else { None })
            .collect();
        // Newest-first; id (uuid v7, time-ordered) breaks creation-time ties.
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    fn remove(&self, tenant_id: TenantId, id: ProgramId) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(&(tenant_id, id)).is_some(),
            Err(_) => false,
        }
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        if let Ok(mut map) = self.inner.write() {
            map.retain(|(t, _id), _p| *t != tenant_id);
        }
    }
}

/// In-memory schema store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySchemaStore {
    inner: RwLock<HashMap<TenantId, TenantSchema>>,
}

impl InMemorySchemaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaStore for InMemorySchemaStore {
    fn get(&self, tenant_id: TenantId) -> Option<TenantSchema> {
        let map = self.inner.read().ok()?;
        map.get(&tenant_id).cloned()
    }

    fn upsert(&self, tenant_id: TenantId, schema: TenantSchema) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(tenant_id, schema);
        }
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(&tenant_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::NewProgram;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn program(tenant: TenantId, name: &str, age_minutes: i64) -> Program {
        Program::create(
            tenant,
            NewProgram { name: name.to_string(), data: json!({}) },
            Utc::now() - Duration::minutes(age_minutes),
        )
    }

    #[test]
    fn list_is_tenant_scoped_and_newest_first() {
        let store = InMemoryProgramStore::new();
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();

        store.upsert(tenant_a, program(tenant_a, "Oldest", 30));
        store.upsert(tenant_a, program(tenant_a, "Newest", 1));
        store.upsert(tenant_a, program(tenant_a, "Middle", 10));
        store.upsert(tenant_b, program(tenant_b, "Other tenant", 0));

        let listed = store.list(tenant_a);
        assert_eq!(
            listed.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Newest", "Middle", "Oldest"]
        );
    }

    #[test]
    fn remove_and_clear_tenant() {
        let store = InMemoryProgramStore::new();
        let tenant = TenantId::new();
        let p = program(tenant, "One", 0);
        let id = p.id;
        store.upsert(tenant, p);

        assert!(store.remove(tenant, id));
        assert!(!store.remove(tenant, id));

        store.upsert(tenant, program(tenant, "Two", 0));
        store.clear_tenant(tenant);
        assert!(store.list(tenant).is_empty());
    }

    #[test]
    fn schema_store_round_trip() {
        let store = InMemorySchemaStore::new();
        let tenant = TenantId::new();
        assert!(store.get(tenant).is_none());

        store.upsert(tenant, TenantSchema::default());
        assert_eq!(store.get(tenant), Some(TenantSchema::default()));
    }
}

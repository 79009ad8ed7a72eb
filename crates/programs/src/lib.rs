//! `eduforge-programs`: program records and tenant-isolated storage seams.
//!
//! A program record's `data` blob must structurally match the owning tenant's
//! schema, but storage never enforces that; validation happens at the edges
//! (form submit, bulk import).

pub mod program;
pub mod store;

pub use program::{NewProgram, Program};
pub use store::{
    InMemoryProgramStore, InMemorySchemaStore, ProgramStore, SchemaStore, TenantSchema,
};

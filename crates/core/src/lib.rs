//! `eduforge-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers and the shared error taxonomy used by every engine crate.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ProgramId, TenantId, UserId};

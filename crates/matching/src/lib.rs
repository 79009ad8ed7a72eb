//! `eduforge-matching`: eligibility-based program matching.
//!
//! Given a tenant's eligibility criteria and a student's answers, filter the
//! tenant's program records and score each survivor by how many criteria the
//! student strictly satisfies. Matching fails open by design: a criterion
//! that cannot be evaluated (unknown operator, missing value, incomparable
//! types) passes the filter rather than hiding every recommendation behind a
//! misconfigured schema, but each degradation is logged, never silent.

pub mod engine;
pub mod predicate;

pub use engine::{match_programs, MatchOutcome, ProgramCard, ProgramMatch, UiDescriptor};
pub use predicate::{evaluate, Satisfaction};

//! `eduforge-schema`: tenant-defined data shapes.
//!
//! A tenant describes the shape of its program records with a [`BuilderSchema`]
//! (ordered sections of typed fields). This crate owns that model plus the
//! type-driven machinery every consumer shares:
//!
//! - the converter between the section-grouped editing shape and the flat
//!   storage shape ([`convert`]),
//! - a single visitor over the field-type tagged union ([`visit`]) reused by
//!   the default-value generator, value validation and display rendering,
//! - default values and edge validation ([`value`]),
//! - display formatting of stored values ([`display`]).

pub mod builder;
pub mod convert;
pub mod display;
pub mod eligibility;
pub mod field;
pub mod section;
pub mod value;
pub mod visit;

pub use builder::BuilderSchema;
pub use convert::{flatten, unflatten};
pub use display::render_value;
pub use eligibility::{ComparisonOperator, EligibilityField, ValidationBounds};
pub use field::{FieldType, FlatField, SchemaField};
pub use section::SchemaSection;
pub use value::{check_value, default_value};
pub use visit::{visit, FieldVisitor};

//! `eduforge-forms`: schema-driven form state and rendering.
//!
//! The dynamic form renderer interprets a tenant's [`BuilderSchema`] into a
//! tree of presentation-neutral input controls, and keeps the record being
//! edited in a [`FormState`], a JSON value tree addressed by typed
//! [`ValuePath`]s that are validated against the schema on every access
//! (no ad hoc string-concatenated paths, no silent off-schema writes).
//!
//! [`BuilderSchema`]: eduforge_schema::BuilderSchema

pub mod path;
pub mod render;
pub mod state;

pub use path::{PathSegment, ValuePath};
pub use render::{render_form, Control, SectionControls};
pub use state::FormState;

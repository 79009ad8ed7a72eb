//! `eduforge-bulk`: bulk import/export of program records.
//!
//! Export generates a tabular template whose flattened `section.field`
//! headers mirror the tenant's schema; import maps such a file back into
//! nested records, validates every row against the schema, and rejects the
//! batch wholesale when any row fails.
//!
//! The engines operate on format-neutral row vectors; CSV is the concrete
//! file format wired up here (`csv` crate). The import engine never persists
//! anything; a clean batch yields one creation request per row for the
//! caller to issue.

pub mod import;
pub mod template;

pub use import::{import_batch, parse_csv_rows, BatchOutcome, RowFailure, DATA_START_ROW};
pub use template::{column_header, build_template, InstructionRow, Template};

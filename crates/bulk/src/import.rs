//! Batch import: tabular rows → validated program creation requests.

use std::io::Read;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use eduforge_core::{DomainError, DomainResult};
use eduforge_programs::NewProgram;
use eduforge_schema::{check_value, BuilderSchema, FieldType};

/// Index of the first data row: row 0 is headers, row 1 is the description
/// row (discarded by convention).
pub const DATA_START_ROW: usize = 2;

/// Validation failures for one row. `row` is the 1-based file line number,
/// ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    pub row: usize,
    pub errors: Vec<String>,
}

/// The all-or-nothing result of validating a batch.
///
/// Every row is validated before any is accepted; a single failing row
/// rejects the whole batch. The engine never persists; `Accepted` carries
/// one creation request per row for the caller to issue (independently,
/// possibly concurrently; cross-row duplicate-name detection is the caller's
/// concern).
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Accepted(Vec<NewProgram>),
    Rejected(Vec<RowFailure>),
}

/// Read raw rows from CSV input. No header handling here; the import
/// engine owns the two-preamble-row convention.
pub fn parse_csv_rows<R: Read>(reader: R) -> DomainResult<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    for record in csv_reader.records() {
        let record = record.map_err(|e| DomainError::validation(format!("csv parse failed: {e}")))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Validate a whole upload against the schema.
///
/// Row 0 must be the flattened headers; row 1 is discarded; data starts at
/// [`DATA_START_ROW`]. Each cell key `section.field` is split on the first
/// `.` and nested under `structured[section][field]`; keys without a dot
/// (`name`) stay top-level.
pub fn import_batch(schema: &BuilderSchema, rows: &[Vec<String>]) -> DomainResult<BatchOutcome> {
    let Some(headers) = rows.first() else {
        return Err(DomainError::validation("upload has no header row"));
    };
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DomainError::validation("upload has no header row"));
    }

    let mut failures = Vec::new();
    let mut accepted = Vec::new();

    for (index, row) in rows.iter().enumerate().skip(DATA_START_ROW) {
        // Trailing blank lines are not rows.
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let structured = structure_row(headers, row);
        let errors = validate_row(schema, &structured);
        if errors.is_empty() {
            accepted.push(to_new_program(schema, structured));
        } else {
            failures.push(RowFailure {
                row: index + 1,
                errors,
            });
        }
    }

    if failures.is_empty() {
        Ok(BatchOutcome::Accepted(accepted))
    } else {
        Ok(BatchOutcome::Rejected(failures))
    }
}

/// Nest one raw row under its section keys. Values stay raw strings here;
/// typed coercion happens only after the row validates.
fn structure_row(headers: &[String], row: &[String]) -> Map<String, Value> {
    let mut structured = Map::new();

    for (column, header) in headers.iter().enumerate() {
        let cell = row.get(column).map(String::as_str).unwrap_or("").trim();
        if header.trim().is_empty() {
            continue;
        }
        match header.split_once('.') {
            Some((section, field)) => {
                let section_map = structured
                    .entry(section.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Some(section_map) = section_map.as_object_mut() {
                    section_map.insert(field.to_string(), Value::String(cell.to_string()));
                }
            }
            None => {
                structured.insert(header.trim().to_string(), Value::String(cell.to_string()));
            }
        }
    }

    structured
}

fn validate_row(schema: &BuilderSchema, structured: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();

    let name_missing = structured
        .get("name")
        .and_then(Value::as_str)
        .map_or(true, |name| name.trim().is_empty());
    if name_missing {
        errors.push("Missing required field \"name\"".to_string());
    }

    for section in &schema.sections {
        let section_value = structured.get(&section.storage_key());
        for field in &section.fields {
            let value = section_value
                .and_then(Value::as_object)
                .and_then(|s| s.get(&field.name));
            errors.extend(check_value(field, &section.name, value));
        }
    }

    errors
}

/// Turn a validated row into a creation request, coercing cells to the
/// schema's types where the type is unambiguous (numbers, booleans).
fn to_new_program(schema: &BuilderSchema, mut structured: Map<String, Value>) -> NewProgram {
    let name = structured
        .remove("name")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    for section in &schema.sections {
        let Some(section_map) = structured
            .get_mut(&section.storage_key())
            .and_then(Value::as_object_mut)
        else {
            continue;
        };
        for field in &section.fields {
            let Some(value) = section_map.get_mut(&field.name) else {
                continue;
            };
            coerce_cell(field.field_type, value);
        }
    }

    NewProgram {
        name,
        data: Value::Object(structured),
    }
}

fn coerce_cell(field_type: FieldType, value: &mut Value) {
    let Some(cell) = value.as_str().map(str::trim) else {
        return;
    };
    match field_type {
        FieldType::Number => {
            if cell.is_empty() {
                *value = Value::Null;
            } else if let Some(number) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
                *value = Value::Number(number);
            }
        }
        FieldType::Boolean => match cell.to_lowercase().as_str() {
            "true" => *value = Value::Bool(true),
            "false" => *value = Value::Bool(false),
            _ => {}
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduforge_schema::{SchemaField, SchemaSection};
    use serde_json::json;

    fn schema() -> BuilderSchema {
        BuilderSchema::new(vec![SchemaSection::new("Program").with_fields(vec![
            SchemaField::new("name2", "Internal Name", FieldType::Text),
            SchemaField::new("level", "Level", FieldType::Enum)
                .with_options(vec!["UG".to_string(), "PG".to_string()]),
            SchemaField::new("gpa", "Minimum GPA", FieldType::Number),
            SchemaField::new("remote", "Remote", FieldType::Boolean),
        ])])
    }

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        let mut out = vec![
            vec!["name", "program.level", "program.gpa", "program.remote"]
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>(),
            vec!["Display name", "UG or PG", "e.g. 3.0", "true/false"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        ];
        out.extend(
            data.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
        );
        out
    }

    #[test]
    fn clean_batch_yields_one_request_per_row_with_typed_cells() {
        let batch = rows(&[
            &["MSc AI", "PG", "3.5", "true"],
            &["BSc CS", "UG", "3.0", "false"],
        ]);
        let outcome = import_batch(&schema(), &batch).unwrap();
        let BatchOutcome::Accepted(programs) = outcome else {
            panic!("expected accepted batch, got {outcome:?}");
        };
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].name, "MSc AI");
        assert_eq!(
            programs[0].data,
            json!({ "program": { "level": "PG", "gpa": 3.5, "remote": true } })
        );
    }

    #[test]
    fn invalid_enum_cell_produces_one_error_citing_allowed_values() {
        let batch = rows(&[&["MSc AI", "PHD", "3.5", "true"]]);
        let BatchOutcome::Rejected(failures) = import_batch(&schema(), &batch).unwrap() else {
            panic!("expected rejection");
        };
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].row, 3);
        assert_eq!(failures[0].errors.len(), 1);
        assert!(failures[0].errors[0].contains("PHD"));
        assert!(failures[0].errors[0].contains("UG, PG"));
    }

    #[test]
    fn missing_name_produces_exactly_one_error() {
        let batch = rows(&[&["", "PG", "3.5", "true"]]);
        let BatchOutcome::Rejected(failures) = import_batch(&schema(), &batch).unwrap() else {
            panic!("expected rejection");
        };
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].errors, vec!["Missing required field \"name\""]);
    }

    #[test]
    fn one_bad_row_rejects_the_whole_batch() {
        let batch = rows(&[
            &["MSc AI", "PG", "3.5", "true"],
            &["BSc CS", "DOCTORATE", "3.0", "false"],
        ]);
        let outcome = import_batch(&schema(), &batch).unwrap();
        let BatchOutcome::Rejected(failures) = outcome else {
            panic!("good row must not survive a failing batch");
        };
        // Only the bad row is reported, but nothing is accepted.
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].row, 4);
    }

    #[test]
    fn description_row_is_discarded_not_validated() {
        // The row-1 description cells ("UG or PG", "e.g. 3.0") would fail
        // enum/number validation if they were treated as data.
        let batch = rows(&[&["MSc AI", "PG", "3.5", "true"]]);
        assert!(matches!(
            import_batch(&schema(), &batch).unwrap(),
            BatchOutcome::Accepted(_)
        ));
    }

    #[test]
    fn non_numeric_number_cell_is_a_row_error() {
        let batch = rows(&[&["MSc AI", "PG", "competitive", "true"]]);
        let BatchOutcome::Rejected(failures) = import_batch(&schema(), &batch).unwrap() else {
            panic!("expected rejection");
        };
        assert!(failures[0].errors[0].contains("Minimum GPA"));
    }

    #[test]
    fn required_schema_field_missing_names_label_and_section() {
        let schema = BuilderSchema::new(vec![SchemaSection::new("Program").with_fields(vec![
            SchemaField::new("level", "Level", FieldType::Text).required(),
        ])]);
        let batch = vec![
            vec!["name".to_string(), "program.level".to_string()],
            vec!["Display name".to_string(), "UG or PG".to_string()],
            vec!["MSc AI".to_string(), "".to_string()],
        ];
        let BatchOutcome::Rejected(failures) = import_batch(&schema, &batch).unwrap() else {
            panic!("expected rejection");
        };
        assert_eq!(
            failures[0].errors,
            vec!["Missing required field \"Level\" in section \"Program\""]
        );
    }

    #[test]
    fn blank_trailing_rows_are_skipped() {
        let mut batch = rows(&[&["MSc AI", "PG", "3.5", "true"]]);
        batch.push(vec![String::new(), String::new(), String::new(), String::new()]);
        let BatchOutcome::Accepted(programs) = import_batch(&schema(), &batch).unwrap() else {
            panic!("expected accepted batch");
        };
        assert_eq!(programs.len(), 1);
    }

    #[test]
    fn csv_rows_parse_without_header_inference() {
        let csv_text = "name,program.level\nDisplay name,UG or PG\nMSc AI,PG\n";
        let rows = parse_csv_rows(csv_text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec!["MSc AI", "PG"]);
    }
}

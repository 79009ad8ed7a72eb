//! Template generation: the file an admin downloads, fills in, and uploads.

use std::io::Write;

use serde::Serialize;

use eduforge_core::DomainResult;
use eduforge_schema::{BuilderSchema, SchemaField, SchemaSection};

/// The flattened column header for one field:
/// `lowercase(section name, whitespace → underscores)` + `.` + field name.
pub fn column_header(section: &SchemaSection, field: &SchemaField) -> String {
    format!("{}.{}", section.storage_key(), field.name)
}

/// One row of the instructions sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionRow {
    pub column_header: String,
    pub field_name: String,
    pub required: bool,
    pub field_type: String,
    pub description: String,
}

/// A generated template: a data sheet (headers, description row, example row)
/// and an instructions sheet. Format-neutral rows; see the `write_*_csv`
/// methods for the CSV rendition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub headers: Vec<String>,
    pub descriptions: Vec<String>,
    pub example_row: Vec<String>,
    pub instructions: Vec<InstructionRow>,
}

/// Walk every section and field in declaration order and emit the template.
///
/// The top-level `name` column always comes first; it is the one column
/// every upload must carry regardless of schema.
pub fn build_template(schema: &BuilderSchema) -> Template {
    let mut headers = vec!["name".to_string()];
    let mut descriptions = vec!["The program's display name (required)".to_string()];
    let mut example_row = vec!["Example Program Name".to_string()];
    let mut instructions = vec![InstructionRow {
        column_header: "name".to_string(),
        field_name: "name".to_string(),
        required: true,
        field_type: "text".to_string(),
        description: "The program's display name".to_string(),
    }];

    for section in &schema.sections {
        for field in &section.fields {
            let header = column_header(section, field);
            descriptions.push(describe(field, section));
            example_row.push(format!("Example {}", field.name));
            instructions.push(InstructionRow {
                column_header: header.clone(),
                field_name: field.name.clone(),
                required: field.required,
                field_type: field.field_type.as_str().to_string(),
                description: describe(field, section),
            });
            headers.push(header);
        }
    }

    Template {
        headers,
        descriptions,
        example_row,
        instructions,
    }
}

fn describe(field: &SchemaField, section: &SchemaSection) -> String {
    let mut description = format!(
        "{} ({}, {})",
        field.label,
        field.field_type.as_str(),
        if field.required { "required" } else { "optional" }
    );
    if let Some(options) = &field.options {
        description.push_str(&format!("; one of: {}", options.join(", ")));
    }
    description.push_str(&format!("; section: {}", section.name));
    description
}

impl Template {
    /// The data sheet: header row, description row (discarded on import),
    /// one example row.
    pub fn write_data_csv<W: Write>(&self, writer: W) -> DomainResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        for row in [&self.headers, &self.descriptions, &self.example_row] {
            out.write_record(row).map_err(csv_error)?;
        }
        out.flush()
            .map_err(|e| eduforge_core::DomainError::validation(format!("csv write failed: {e}")))?;
        Ok(())
    }

    /// The instructions sheet: one row per column.
    pub fn write_instructions_csv<W: Write>(&self, writer: W) -> DomainResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["Column Header", "Field Name", "Required", "Type", "Description"])
            .map_err(csv_error)?;
        for row in &self.instructions {
            out.write_record([
                row.column_header.as_str(),
                row.field_name.as_str(),
                if row.required { "Yes" } else { "No" },
                row.field_type.as_str(),
                row.description.as_str(),
            ])
            .map_err(csv_error)?;
        }
        out.flush()
            .map_err(|e| eduforge_core::DomainError::validation(format!("csv write failed: {e}")))?;
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> eduforge_core::DomainError {
    eduforge_core::DomainError::validation(format!("csv write failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduforge_schema::FieldType;

    fn schema() -> BuilderSchema {
        BuilderSchema::new(vec![
            SchemaSection::new("Basic Information").with_fields(vec![
                SchemaField::new("programName", "Program Name", FieldType::Text).required(),
                SchemaField::new("level", "Level", FieldType::Enum)
                    .with_options(vec!["UG".to_string(), "PG".to_string()]),
            ]),
            SchemaSection::new("Fees And Funding").with_fields(vec![
                SchemaField::new("tuition", "Tuition", FieldType::Number),
            ]),
        ])
    }

    #[test]
    fn headers_flatten_section_and_field_names() {
        let template = build_template(&schema());
        assert_eq!(
            template.headers,
            vec![
                "name",
                "basic_information.programName",
                "basic_information.level",
                "fees_and_funding.tuition",
            ]
        );
    }

    #[test]
    fn example_row_names_each_field() {
        let template = build_template(&schema());
        assert_eq!(template.example_row[0], "Example Program Name");
        assert_eq!(template.example_row[1], "Example programName");
        assert_eq!(template.example_row.len(), template.headers.len());
        assert_eq!(template.descriptions.len(), template.headers.len());
    }

    #[test]
    fn instructions_cover_every_column() {
        let template = build_template(&schema());
        assert_eq!(template.instructions.len(), template.headers.len());
        let level = &template.instructions[2];
        assert_eq!(level.column_header, "basic_information.level");
        assert_eq!(level.field_type, "enum");
        assert!(!level.required);
        assert!(level.description.contains("UG, PG"));
    }

    #[test]
    fn data_csv_has_two_preamble_rows_before_data() {
        let template = build_template(&schema());
        let mut bytes = Vec::new();
        template.write_data_csv(&mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name,basic_information.programName"));
        assert!(lines[2].contains("Example Program Name"));
    }

    #[test]
    fn instructions_csv_has_expected_columns() {
        let template = build_template(&schema());
        let mut bytes = Vec::new();
        template.write_instructions_csv(&mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Column Header,Field Name,Required,Type,Description"));
    }
}

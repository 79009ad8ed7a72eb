//! Control descriptors.
//!
//! Rendering interprets a field definition (plus the current form state)
//! into a presentation-neutral control tree the embedding UI draws. One
//! control per field; arrays render one child per existing element plus an
//! add affordance at the array's own path; objects render their declared
//! sub-fields wrapped in a group.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use eduforge_schema::{visit, BuilderSchema, FieldVisitor, SchemaField};

use crate::path::ValuePath;
use crate::state::FormState;

/// One input control bound to a path in the form state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum Control {
    TextInput {
        path: ValuePath,
        label: String,
        required: bool,
    },
    NumberInput {
        path: ValuePath,
        label: String,
        required: bool,
    },
    Toggle {
        path: ValuePath,
        label: String,
        required: bool,
    },
    Select {
        path: ValuePath,
        label: String,
        required: bool,
        options: Vec<String>,
    },
    ArrayGroup {
        path: ValuePath,
        label: String,
        required: bool,
        /// One rendered control per existing element; removal re-indexes.
        elements: Vec<Control>,
        /// Push a defaulted element at this path to add one.
        add_path: ValuePath,
    },
    ObjectGroup {
        path: ValuePath,
        label: String,
        required: bool,
        children: Vec<Control>,
    },
}

/// A section's rendered controls, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionControls {
    pub section: String,
    pub is_expanded: bool,
    pub controls: Vec<Control>,
}

/// Render the whole form for the current state.
pub fn render_form(schema: &BuilderSchema, state: &FormState) -> Vec<SectionControls> {
    schema
        .sections
        .iter()
        .map(|section| SectionControls {
            section: section.name.clone(),
            is_expanded: section.is_expanded,
            controls: section
                .fields
                .iter()
                .map(|field| {
                    let path = ValuePath::field(section.storage_key(), &field.name);
                    let value = state.get(&path);
                    render_field(field, path, value)
                })
                .collect(),
        })
        .collect()
}

/// Render one field at a path, recursively.
pub fn render_field(field: &SchemaField, path: ValuePath, value: Option<&Value>) -> Control {
    visit(field, &mut ControlRender { path, value })
}

struct ControlRender<'a> {
    path: ValuePath,
    value: Option<&'a Value>,
}

impl FieldVisitor for ControlRender<'_> {
    type Output = Control;

    fn text(&mut self, field: &SchemaField) -> Control {
        Control::TextInput {
            path: self.path.clone(),
            label: field.label.clone(),
            required: field.required,
        }
    }

    fn number(&mut self, field: &SchemaField) -> Control {
        Control::NumberInput {
            path: self.path.clone(),
            label: field.label.clone(),
            required: field.required,
        }
    }

    fn boolean(&mut self, field: &SchemaField) -> Control {
        Control::Toggle {
            path: self.path.clone(),
            label: field.label.clone(),
            required: field.required,
        }
    }

    fn enumeration(&mut self, field: &SchemaField, options: &[String]) -> Control {
        Control::Select {
            path: self.path.clone(),
            label: field.label.clone(),
            required: field.required,
            options: options.to_vec(),
        }
    }

    fn array(&mut self, field: &SchemaField, element: Option<&SchemaField>) -> Control {
        let elements = match (element, self.value.and_then(Value::as_array)) {
            (Some(element), Some(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| render_field(element, self.path.element(i), Some(item)))
                .collect(),
            _ => Vec::new(),
        };
        Control::ArrayGroup {
            path: self.path.clone(),
            label: field.label.clone(),
            required: field.required,
            elements,
            add_path: self.path.clone(),
        }
    }

    fn object(
        &mut self,
        field: &SchemaField,
        fields: Option<&BTreeMap<String, SchemaField>>,
    ) -> Control {
        let children = fields
            .map(|fields| {
                fields
                    .values()
                    .map(|nested| {
                        let child_path = self.path.child(&nested.name);
                        let child_value = self
                            .value
                            .and_then(Value::as_object)
                            .and_then(|map| map.get(&nested.name));
                        render_field(nested, child_path, child_value)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Control::ObjectGroup {
            path: self.path.clone(),
            label: field.label.clone(),
            required: field.required,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduforge_schema::{FieldType, SchemaSection};
    use serde_json::json;

    fn schema() -> BuilderSchema {
        let entry = SchemaField::new("entry", "Entry", FieldType::Object).with_fields(
            BTreeMap::from([(
                "title".to_string(),
                SchemaField::new("title", "Title", FieldType::Text).required(),
            )]),
        );
        BuilderSchema::new(vec![SchemaSection::new("Basic Information").with_fields(vec![
            SchemaField::new("programName", "Program Name", FieldType::Text).required(),
            SchemaField::new("level", "Level", FieldType::Enum)
                .with_options(vec!["UG".to_string(), "PG".to_string()]),
            SchemaField::new("milestones", "Milestones", FieldType::Array).with_element(entry),
        ])])
    }

    #[test]
    fn renders_one_control_per_field_in_order() {
        let schema = schema();
        let state = FormState::new(&schema);
        let sections = render_form(&schema, &state);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section, "Basic Information");

        match &sections[0].controls[..] {
            [Control::TextInput { required, .. }, Control::Select { options, .. }, Control::ArrayGroup { elements, .. }] =>
            {
                assert!(*required);
                assert_eq!(options, &["UG".to_string(), "PG".to_string()]);
                assert!(elements.is_empty());
            }
            other => panic!("unexpected controls: {other:?}"),
        }
    }

    #[test]
    fn array_renders_one_child_per_existing_element() {
        let schema = schema();
        let mut state = FormState::new(&schema);
        let milestones: ValuePath = "basic_information.milestones".parse().unwrap();
        state.push_element(&milestones).unwrap();
        state.push_element(&milestones).unwrap();

        let sections = render_form(&schema, &state);
        let Control::ArrayGroup { elements, add_path, .. } = &sections[0].controls[2] else {
            panic!("expected array group");
        };
        assert_eq!(elements.len(), 2);
        assert_eq!(add_path.to_string(), "basic_information.milestones");

        // Each element is an object group whose children bind under its index.
        let Control::ObjectGroup { children, .. } = &elements[1] else {
            panic!("expected object group element");
        };
        let Control::TextInput { path, required, .. } = &children[0] else {
            panic!("expected text input child");
        };
        assert_eq!(path.to_string(), "basic_information.milestones.1.title");
        assert!(*required);
    }

    #[test]
    fn control_tree_serializes_with_tags_and_dotted_paths() {
        let field = SchemaField::new("gpa", "Minimum GPA", FieldType::Number);
        let control = render_field(&field, ValuePath::field("requirements", "gpa"), Some(&json!(0)));
        let json = serde_json::to_value(&control).unwrap();
        assert_eq!(json["control"], "numberInput");
        assert_eq!(json["path"], "requirements.gpa");
    }
}

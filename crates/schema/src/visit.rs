//! One dispatch over the field-type tagged union.
//!
//! Default-value generation, edge validation and display rendering all branch
//! on [`FieldType`](crate::field::FieldType). Rather than each consumer
//! re-deriving its own type switch, they implement [`FieldVisitor`] and let
//! [`visit`] do the dispatch, so one place knows which sub-structure belongs to
//! which variant.

use std::collections::BTreeMap;

use crate::field::{FieldType, SchemaField};

/// A computation over one field definition, with one method per type variant.
///
/// The structured variants receive their sub-structure directly; a field
/// whose sub-structure is missing (an integrity violation that slipped past
/// save-time checks) is passed through as `None`/empty so visitors can
/// degrade instead of panicking.
pub trait FieldVisitor {
    type Output;

    fn text(&mut self, field: &SchemaField) -> Self::Output;
    fn number(&mut self, field: &SchemaField) -> Self::Output;
    fn boolean(&mut self, field: &SchemaField) -> Self::Output;
    fn enumeration(&mut self, field: &SchemaField, options: &[String]) -> Self::Output;
    fn array(&mut self, field: &SchemaField, element: Option<&SchemaField>) -> Self::Output;
    fn object(
        &mut self,
        field: &SchemaField,
        fields: Option<&BTreeMap<String, SchemaField>>,
    ) -> Self::Output;
}

/// Dispatch `visitor` on `field.field_type`.
pub fn visit<V: FieldVisitor>(field: &SchemaField, visitor: &mut V) -> V::Output {
    match field.field_type {
        FieldType::Text => visitor.text(field),
        FieldType::Number => visitor.number(field),
        FieldType::Boolean => visitor.boolean(field),
        FieldType::Enum => {
            let options = field.options.as_deref().unwrap_or(&[]);
            visitor.enumeration(field, options)
        }
        FieldType::Array => visitor.array(field, field.array_type.as_deref()),
        FieldType::Object => visitor.object(field, field.fields.as_ref()),
    }
}

//! Conversions between the field list and the wire schema object
//!
//! - [`serialize`] turns a [`Schema`] into the `{name: type | {type, ...}}`
//!   object sent to the generation service.
//! - [`resolve_aliases`] turns pasted JSON shorthand into field descriptors.

use serde_json::{Map, Value};
use tracing::debug;

use crate::alias::resolve_type;
use crate::catalog::FieldCatalog;
use crate::error::SchemaError;
use crate::field::FieldDescriptor;
use crate::schema::Schema;

/// Serialize a schema into the request's `schema` object
///
/// Keys follow schema order. A field without constraints becomes its bare
/// type string; otherwise an object with `type` followed by each constraint.
pub fn serialize(schema: &Schema) -> Map<String, Value> {
    debug!(count = schema.len(), "serialize: called");
    schema
        .iter()
        .map(|field| (field.name.clone(), serialize_field(field)))
        .collect()
}

fn serialize_field(field: &FieldDescriptor) -> Value {
    if field.constraints.is_empty() {
        return Value::String(field.field_type.clone());
    }

    let mut object = Map::with_capacity(field.constraints.len() + 1);
    object.insert("type".to_string(), Value::String(field.field_type.clone()));
    for (name, value) in &field.constraints {
        object.insert(name.clone(), value.to_json());
    }
    Value::Object(object)
}

/// Resolve pasted JSON text into field descriptors
///
/// The text must be a JSON object mapping field names to type names. Each
/// type name is resolved catalog first, alias second. The first failure is
/// returned and nothing else is produced. Resolved fields carry no
/// constraints.
pub fn resolve_aliases(raw: &str, catalog: &FieldCatalog) -> Result<Vec<FieldDescriptor>, SchemaError> {
    debug!(len = raw.len(), "resolve_aliases: called");
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(entries)) => entries,
        Ok(_) | Err(_) => return Err(SchemaError::NotAnObject),
    };

    entries
        .into_iter()
        .map(|(name, raw_type)| {
            let resolved = match &raw_type {
                Value::String(type_name) => resolve_type(type_name, catalog)?,
                other => return Err(SchemaError::UnknownFieldType(other.to_string())),
            };
            Ok(FieldDescriptor::new(name, resolved))
        })
        .collect()
}

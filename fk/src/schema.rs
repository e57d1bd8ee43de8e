//! The ordered field list a user builds up

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::FieldCatalog;
use crate::error::SchemaError;
use crate::field::{FieldDescriptor, FieldDraft};
use crate::normalize;
use crate::validate::{ensure_unique_names, validate_field};

/// Ordered, name-unique sequence of field descriptors
///
/// Insertion order is the output column order. All mutating operations either
/// succeed completely or leave the schema as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field after validating it
    pub fn add_field(
        &mut self,
        candidate: FieldDescriptor,
        catalog: &FieldCatalog,
    ) -> Result<&[FieldDescriptor], SchemaError> {
        debug!(name = %candidate.name, field_type = %candidate.field_type, "add_field: called");
        validate_field(&candidate, catalog)?;
        if self.contains(&candidate.name) {
            debug!(name = %candidate.name, "add_field: duplicate name");
            return Err(SchemaError::DuplicateName(candidate.name));
        }

        self.fields.push(candidate);
        Ok(&self.fields)
    }

    /// Add the draft's field; the draft is cleared only when the add succeeds
    pub fn commit_draft(
        &mut self,
        draft: &mut FieldDraft,
        catalog: &FieldCatalog,
    ) -> Result<&[FieldDescriptor], SchemaError> {
        self.add_field(draft.to_descriptor(), catalog)?;
        *draft = FieldDraft::default();
        Ok(&self.fields)
    }

    /// Remove the field at `index`; out of range is a no-op
    pub fn remove_field(&mut self, index: usize) -> Option<FieldDescriptor> {
        if index >= self.fields.len() {
            debug!(index, len = self.fields.len(), "remove_field: index out of range");
            return None;
        }
        Some(self.fields.remove(index))
    }

    /// Swap in a whole new field list, validating every entry first
    pub fn replace_all(&mut self, fields: Vec<FieldDescriptor>, catalog: &FieldCatalog) -> Result<(), SchemaError> {
        debug!(count = fields.len(), "replace_all: called");
        for field in &fields {
            validate_field(field, catalog)?;
        }
        ensure_unique_names(fields.iter().map(|f| f.name.as_str()))?;

        self.fields = fields;
        Ok(())
    }

    /// Replace the schema from pasted JSON shorthand such as `{"age": "int"}`
    pub fn import_json(&mut self, raw: &str, catalog: &FieldCatalog) -> Result<(), SchemaError> {
        let fields = normalize::resolve_aliases(raw, catalog)?;
        self.replace_all(fields, catalog)?;
        info!(count = self.fields.len(), "import_json: schema replaced");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field types no longer present in `catalog`
    ///
    /// The catalog can change server-side after fields were accepted.
    pub fn stale_types<'a>(&'a self, catalog: &FieldCatalog) -> Vec<&'a str> {
        self.fields
            .iter()
            .filter(|f| !catalog.contains(&f.field_type))
            .map(|f| f.field_type.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

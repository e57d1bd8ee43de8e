//! Checks shared by single-field adds and whole-schema replacement

use crate::catalog::{ConstraintKind, FieldCatalog};
use crate::error::SchemaError;
use crate::field::{ConstraintValue, FieldDescriptor};

/// Validate one candidate field against the catalog
///
/// Uniqueness is not checked here; that depends on the schema it joins.
pub fn validate_field(candidate: &FieldDescriptor, catalog: &FieldCatalog) -> Result<(), SchemaError> {
    if candidate.name.trim().is_empty() {
        return Err(SchemaError::MissingName);
    }
    if candidate.field_type.trim().is_empty() {
        return Err(SchemaError::MissingType);
    }

    let spec = catalog
        .get(&candidate.field_type)
        .ok_or_else(|| SchemaError::UnknownFieldType(candidate.field_type.clone()))?;

    for (name, value) in &candidate.constraints {
        let declared = spec.constraint(name).ok_or_else(|| SchemaError::UnknownConstraint {
            field_type: candidate.field_type.clone(),
            constraint: name.clone(),
        })?;
        if declared.kind == ConstraintKind::Number && value.kind() != ConstraintKind::Number {
            return Err(SchemaError::InvalidConstraintValue {
                constraint: name.clone(),
                value: value.to_string(),
            });
        }
    }

    for required in spec.constraints.iter().filter(|c| c.required) {
        let present = match candidate.constraints.get(&required.name) {
            Some(ConstraintValue::Text(s)) => !s.trim().is_empty(),
            Some(ConstraintValue::Number(_)) => true,
            None => false,
        };
        if !present {
            return Err(SchemaError::MissingConstraint {
                field_type: candidate.field_type.clone(),
                constraint: required.name.clone(),
            });
        }
    }

    Ok(())
}

/// Reject the first name that appears twice
pub fn ensure_unique_names<'a, I>(names: I) -> Result<(), SchemaError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if seen.contains(&name) {
            return Err(SchemaError::DuplicateName(name.to_string()));
        }
        seen.push(name);
    }
    Ok(())
}

//! Field descriptors, constraint values and the in-progress field draft

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::catalog::{ConstraintKind, FieldCatalog};
use crate::error::SchemaError;

/// A constraint value: numeric constraints hold numbers, string constraints hold text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintValue {
    Number(serde_json::Number),
    Text(String),
}

impl ConstraintValue {
    /// Parse raw user input for a constraint of the given kind
    ///
    /// Returns `Ok(None)` for an empty numeric input, which leaves the
    /// constraint unset. Integers keep their integer form; anything else
    /// numeric must be a finite float.
    pub fn parse(kind: ConstraintKind, constraint: &str, raw: &str) -> Result<Option<Self>, SchemaError> {
        match kind {
            ConstraintKind::String => Ok(Some(Self::Text(raw.to_string()))),
            ConstraintKind::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                if let Ok(n) = trimmed.parse::<i64>() {
                    return Ok(Some(Self::Number(n.into())));
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(|n| Some(Self::Number(n)))
                    .ok_or_else(|| SchemaError::InvalidConstraintValue {
                        constraint: constraint.to_string(),
                        value: raw.to_string(),
                    })
            }
        }
    }

    /// The kind of constraint this value can satisfy
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::Number(_) => ConstraintKind::Number,
            Self::Text(_) => ConstraintKind::String,
        }
    }

    /// Convert into a plain JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Number(n) => serde_json::Value::Number(n.clone()),
            Self::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for ConstraintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ConstraintValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for ConstraintValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ConstraintValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Constraint values keyed by constraint name, in entry order
pub type Constraints = IndexMap<String, ConstraintValue>;

/// One user-defined field of the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Output column / record key
    pub name: String,

    /// Canonical catalog type key
    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub constraints: Constraints,
}

impl FieldDescriptor {
    /// A field with no constraints
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            constraints: Constraints::new(),
        }
    }

    /// Add a constraint value
    pub fn with_constraint(mut self, name: impl Into<String>, value: impl Into<ConstraintValue>) -> Self {
        self.constraints.insert(name.into(), value.into());
        self
    }
}

/// The "new field" entry being filled in before it is added to the schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDraft {
    pub name: String,
    pub field_type: String,
    pub constraints: Constraints,
}

impl FieldDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Choose a type; constraints entered for a previous type are discarded
    pub fn set_type(&mut self, field_type: impl Into<String>) {
        let field_type = field_type.into();
        if field_type != self.field_type {
            debug!(%field_type, "FieldDraft::set_type: resetting constraints");
            self.constraints.clear();
        }
        self.field_type = field_type;
    }

    /// Set a constraint from raw text, interpreted by the declared kind
    ///
    /// An empty numeric value removes the constraint.
    pub fn set_constraint(&mut self, name: &str, raw: &str, catalog: &FieldCatalog) -> Result<(), SchemaError> {
        debug!(%name, field_type = %self.field_type, "FieldDraft::set_constraint: called");
        let spec = catalog
            .get(&self.field_type)
            .ok_or_else(|| SchemaError::UnknownFieldType(self.field_type.clone()))?;
        let constraint = spec
            .constraint(name)
            .ok_or_else(|| SchemaError::UnknownConstraint {
                field_type: self.field_type.clone(),
                constraint: name.to_string(),
            })?;

        match ConstraintValue::parse(constraint.kind, name, raw)? {
            Some(value) => {
                self.constraints.insert(name.to_string(), value);
            }
            None => {
                self.constraints.shift_remove(name);
            }
        }
        Ok(())
    }

    /// True when nothing has been entered
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.field_type.is_empty() && self.constraints.is_empty()
    }

    /// Snapshot the draft as a candidate descriptor
    pub fn to_descriptor(&self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name.clone(),
            field_type: self.field_type.clone(),
            constraints: self.constraints.clone(),
        }
    }
}

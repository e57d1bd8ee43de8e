//! Schema validation errors

use thiserror::Error;

/// Errors raised while building, importing or submitting a schema
///
/// Every variant is a local validation failure: the operation that raised it
/// leaves the schema unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Field name is required")]
    MissingName,

    #[error("Field type is required")]
    MissingType,

    #[error("Field '{0}' already exists")]
    DuplicateName(String),

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Field type '{field_type}' has no constraint named '{constraint}'")]
    UnknownConstraint { field_type: String, constraint: String },

    #[error("Constraint '{constraint}' expects a number, got '{value}'")]
    InvalidConstraintValue { constraint: String, value: String },

    #[error("Field type '{field_type}' requires constraint '{constraint}'")]
    MissingConstraint { field_type: String, constraint: String },

    #[error("Schema JSON must be an object mapping field names to types")]
    NotAnObject,

    #[error("Schema has no fields")]
    EmptySchema,

    #[error("Record count must be between {min} and {max}, got {count}")]
    InvalidCount { count: u32, min: u32, max: u32 },

    #[error("Seed must be an integer, got '{0}'")]
    InvalidSeed(String),

    #[error("Invalid field catalog: {0}")]
    InvalidCatalog(String),
}

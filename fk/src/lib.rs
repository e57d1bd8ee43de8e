//! FieldKit - schema building and normalization for mock data generation
//!
//! A schema is an ordered list of named, typed fields. FieldKit keeps that
//! list consistent and turns it into the request object a generation service
//! expects.
//!
//! # Pipeline
//!
//! ```text
//! user input ──► Schema (add/remove/replace) ──► normalize::serialize ──► GenerationRequest
//! pasted JSON ──► normalize::resolve_aliases ──► Schema::replace_all
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fieldkit::{FieldCatalog, GenerationRequest, Schema};
//!
//! let catalog = FieldCatalog::from_response(fields_json)?;
//! let mut schema = Schema::new();
//! schema.import_json(r#"{"username": "string", "age": "int"}"#, &catalog)?;
//! let request = GenerationRequest::preview(&schema, 50, None)?;
//! ```

pub mod alias;
pub mod catalog;
mod error;
pub mod field;
pub mod normalize;
pub mod request;
mod schema;
pub mod validate;

pub use alias::{ALIASES, alias_target, resolve_type};
pub use catalog::{ConstraintKind, ConstraintSpec, FieldCatalog, FieldTypeSpec};
pub use error::SchemaError;
pub use field::{ConstraintValue, Constraints, FieldDescriptor, FieldDraft};
pub use request::{GenerationRequest, OutputFormat, parse_seed};
pub use schema::Schema;

/// Maximum records requested by a preview
pub const PREVIEW_LIMIT: u32 = 10;

/// Smallest record count the generation service accepts
pub const MIN_RECORD_COUNT: u32 = 1;

/// Largest record count the generation service accepts
pub const MAX_RECORD_COUNT: u32 = 1000;

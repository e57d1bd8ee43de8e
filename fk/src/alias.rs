//! Shorthand type names and their canonical catalog keys

use tracing::debug;

use crate::catalog::FieldCatalog;
use crate::error::SchemaError;

/// Shorthand or commonly confused type name -> canonical catalog key
pub const ALIASES: &[(&str, &str)] = &[
    ("number", "integer"),
    ("int", "integer"),
    ("bool", "boolean"),
    ("id", "uuid"),
    ("guid", "uuid"),
    ("date", "created_at"),
    ("datetime", "created_at"),
    ("timestamp", "unix_timestamp"),
    ("name", "full_name"),
    ("double", "float"),
    ("decimal", "float"),
    ("phone_number", "phone"),
    ("ip_address", "ip"),
    ("zip", "zip_code"),
    ("postcode", "zip_code"),
];

/// Canonical key for an alias, if `name` is one
pub fn alias_target(name: &str) -> Option<&'static str> {
    ALIASES.iter().find(|(alias, _)| *alias == name).map(|(_, target)| *target)
}

/// Resolve a user-supplied type name against the catalog
///
/// A catalog key always wins over an alias of the same name. When the name
/// cannot be resolved, or its alias target is missing from the catalog, the
/// error names `raw` as the user typed it.
pub fn resolve_type(raw: &str, catalog: &FieldCatalog) -> Result<String, SchemaError> {
    if catalog.contains(raw) {
        debug!(%raw, "resolve_type: catalog key");
        return Ok(raw.to_string());
    }

    match alias_target(raw) {
        Some(target) if catalog.contains(target) => {
            debug!(%raw, %target, "resolve_type: alias");
            Ok(target.to_string())
        }
        _ => {
            debug!(%raw, "resolve_type: unresolved");
            Err(SchemaError::UnknownFieldType(raw.to_string()))
        }
    }
}

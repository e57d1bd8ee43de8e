//! Field type catalog advertised by the generation service
//!
//! The service answers `GET /api/fields` with either `{fields, categories}` or
//! a bare field map. Both shapes are folded into [`FieldCatalog`] here so the
//! rest of the crate never looks at the response shape again.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::error::SchemaError;
use crate::field::ConstraintValue;

/// Value kind accepted by a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Number,
    #[serde(alias = "text")]
    String,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
        }
    }
}

/// One constraint a field type accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ConstraintKind,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ConstraintValue>,
}

impl ConstraintSpec {
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ConstraintKind::Number,
            label: label.into(),
            required: false,
            default: None,
        }
    }

    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ConstraintKind::String,
            label: label.into(),
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<ConstraintValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A generatable field type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTypeSpec {
    pub label: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

impl FieldTypeSpec {
    pub fn new(label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category: category.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ConstraintSpec) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Look up a declared constraint by name
    pub fn constraint(&self, name: &str) -> Option<&ConstraintSpec> {
        self.constraints.iter().find(|c| c.name == name)
    }
}

/// Registry of field types keyed by canonical type key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCatalog {
    fields: IndexMap<String, FieldTypeSpec>,
    categories: Vec<String>,
}

impl FieldCatalog {
    /// Build a catalog from a field map, deriving categories in first-appearance order
    pub fn new(fields: IndexMap<String, FieldTypeSpec>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for spec in fields.values() {
            if !spec.category.is_empty() && !categories.contains(&spec.category) {
                categories.push(spec.category.clone());
            }
        }
        Self { fields, categories }
    }

    /// Convenience constructor from `(key, spec)` pairs
    pub fn from_specs<K, I>(specs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldTypeSpec)>,
    {
        Self::new(specs.into_iter().map(|(k, spec)| (k.into(), spec)).collect())
    }

    /// Ingest a `GET /api/fields` response body in either shape
    pub fn from_response(value: Value) -> Result<Self, SchemaError> {
        let Value::Object(mut root) = value else {
            return Err(SchemaError::InvalidCatalog("expected a JSON object".to_string()));
        };

        // A bare map may legitimately contain a field type keyed "fields";
        // that entry is a spec (it has a label), not a nested map.
        let nested = matches!(root.get("fields"), Some(Value::Object(inner)) if !inner.contains_key("label"));
        debug!(nested, "FieldCatalog::from_response: called");

        if !nested {
            return Self::parse_fields(Value::Object(root)).map(Self::new);
        }

        let fields = Self::parse_fields(root.remove("fields").unwrap_or_default())?;
        match root.remove("categories") {
            Some(Value::Null) | None => Ok(Self::new(fields)),
            Some(categories) => {
                let categories: Vec<String> =
                    serde_json::from_value(categories).map_err(|e| SchemaError::InvalidCatalog(e.to_string()))?;
                Ok(Self { fields, categories })
            }
        }
    }

    fn parse_fields(value: Value) -> Result<IndexMap<String, FieldTypeSpec>, SchemaError> {
        serde_json::from_value(value).map_err(|e| SchemaError::InvalidCatalog(e.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&FieldTypeSpec> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldTypeSpec)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Field types grouped by category
    ///
    /// Groups follow the category list; types whose category is not listed
    /// get trailing groups of their own. Empty groups are dropped.
    pub fn by_category(&self) -> Vec<(&str, Vec<(&str, &FieldTypeSpec)>)> {
        let mut groups: Vec<(&str, Vec<(&str, &FieldTypeSpec)>)> =
            self.categories.iter().map(|c| (c.as_str(), Vec::new())).collect();

        for (key, spec) in &self.fields {
            match groups.iter_mut().find(|(name, _)| *name == spec.category) {
                Some((_, members)) => members.push((key.as_str(), spec)),
                None => groups.push((spec.category.as_str(), vec![(key.as_str(), spec)])),
            }
        }

        groups.retain(|(_, members)| !members.is_empty());
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_fields() -> Value {
        json!({
            "first_name": {"label": "First Name", "category": "Identity", "faker_method": "first_name", "constraints": []},
            "email": {
                "label": "Email",
                "category": "Contact",
                "constraints": [{"name": "domain", "type": "text", "label": "Domain (optional)", "required": false}]
            },
            "age": {
                "label": "Age",
                "category": "Dates & Time",
                "constraints": [
                    {"name": "min", "type": "number", "label": "Minimum", "required": false, "default": 18},
                    {"name": "max", "type": "number", "label": "Maximum", "required": false, "default": 65}
                ]
            },
            "last_name": {"label": "Last Name", "category": "Identity", "constraints": []}
        })
    }

    #[test]
    fn test_nested_and_bare_shapes_agree_on_fields() {
        let nested = FieldCatalog::from_response(json!({
            "fields": sample_fields(),
            "categories": ["Contact", "Identity", "Dates & Time"]
        }))
        .unwrap();
        let bare = FieldCatalog::from_response(sample_fields()).unwrap();

        assert_eq!(nested.len(), 4);
        assert_eq!(
            nested.keys().collect::<Vec<_>>(),
            bare.keys().collect::<Vec<_>>()
        );
        assert_eq!(nested.get("age"), bare.get("age"));
        assert_eq!(nested.categories(), ["Contact", "Identity", "Dates & Time"]);
        assert_eq!(bare.categories(), ["Identity", "Contact", "Dates & Time"]);
    }

    #[test]
    fn test_nested_without_categories_derives_them() {
        let catalog = FieldCatalog::from_response(json!({"fields": sample_fields()})).unwrap();
        assert_eq!(catalog.categories(), ["Identity", "Contact", "Dates & Time"]);
    }

    #[test]
    fn test_text_kind_reads_as_string() {
        let catalog = FieldCatalog::from_response(sample_fields()).unwrap();
        let domain = catalog.get("email").unwrap().constraint("domain").unwrap();
        assert_eq!(domain.kind, ConstraintKind::String);

        let min = catalog.get("age").unwrap().constraint("min").unwrap();
        assert_eq!(min.kind, ConstraintKind::Number);
        assert_eq!(min.default, Some(ConstraintValue::from(18)));
    }

    #[test]
    fn test_bare_map_with_field_type_named_fields() {
        let catalog = FieldCatalog::from_response(json!({
            "fields": {"label": "Fields", "category": "Misc"},
            "uuid": {"label": "UUID", "category": "IDs & System"}
        }))
        .unwrap();
        assert!(catalog.contains("fields"));
        assert!(catalog.contains("uuid"));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            FieldCatalog::from_response(json!(["string"])),
            Err(SchemaError::InvalidCatalog(_))
        ));
        assert!(matches!(
            FieldCatalog::from_response(json!({"broken": {"category": "x"}})),
            Err(SchemaError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_by_category_groups_in_order() {
        let catalog = FieldCatalog::from_response(sample_fields()).unwrap();
        let groups = catalog.by_category();
        let names: Vec<_> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(names, vec!["Identity", "Contact", "Dates & Time"]);

        let identity: Vec<_> = groups[0].1.iter().map(|(k, _)| *k).collect();
        assert_eq!(identity, vec!["first_name", "last_name"]);
    }

    #[test]
    fn test_by_category_keeps_unlisted_categories() {
        let catalog = FieldCatalog::from_response(json!({
            "fields": sample_fields(),
            "categories": ["Identity"]
        }))
        .unwrap();
        let total: usize = catalog.by_category().iter().map(|(_, m)| m.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_cache_round_trip_through_response_parser() {
        let catalog = FieldCatalog::from_response(sample_fields()).unwrap();
        let cached = serde_json::to_value(&catalog).unwrap();
        assert_eq!(FieldCatalog::from_response(cached).unwrap(), catalog);
    }
}

//! On-disk schema and catalog cache
//!
//! ```text
//! ~/.local/share/dummygen/
//! ├── schema.json    # {updated_at, fields: [...]}
//! └── catalog.json   # last fetched field catalog
//! ```

use chrono::{DateTime, Utc};
use fieldkit::{FieldCatalog, Schema};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted form of the schema being built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    pub updated_at: DateTime<Utc>,
    pub fields: Schema,
}

/// File-backed storage for the schema and the catalog cache
#[derive(Debug, Clone)]
pub struct SchemaStore {
    schema_path: PathBuf,
    catalog_path: PathBuf,
}

impl SchemaStore {
    pub fn new(schema_path: impl Into<PathBuf>, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            catalog_path: catalog_path.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.schema_path.clone(), config.catalog_path.clone())
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Load the schema; a missing file is an empty schema
    pub fn load_schema(&self) -> Result<Schema, StoreError> {
        match read_json::<SchemaFile>(&self.schema_path)? {
            Some(file) => {
                debug!(path = ?self.schema_path, fields = file.fields.len(), "load_schema: loaded");
                Ok(file.fields)
            }
            None => {
                debug!(path = ?self.schema_path, "load_schema: no schema file");
                Ok(Schema::new())
            }
        }
    }

    pub fn save_schema(&self, schema: &Schema) -> Result<(), StoreError> {
        let file = SchemaFile {
            updated_at: Utc::now(),
            fields: schema.clone(),
        };
        write_json(&self.schema_path, &file)?;
        info!(path = ?self.schema_path, fields = schema.len(), "save_schema: saved");
        Ok(())
    }

    /// Cached catalog, if one has been fetched before
    pub fn load_catalog(&self) -> Result<Option<FieldCatalog>, StoreError> {
        read_json(&self.catalog_path)
    }

    pub fn save_catalog(&self, catalog: &FieldCatalog) -> Result<(), StoreError> {
        write_json(&self.catalog_path, catalog)?;
        debug!(path = ?self.catalog_path, field_types = catalog.len(), "save_catalog: cached");
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content).map(Some).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write via a sibling temp file so a failed write never truncates the old file
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    fs::write(&tmp_path, content).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(io_err)
}

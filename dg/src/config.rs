//! DummyGen configuration types and loading

use eyre::{Context, Result};
use fieldkit::{MAX_RECORD_COUNT, MIN_RECORD_COUNT, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `api.base-url`
pub const API_URL_ENV: &str = "DUMMYGEN_API_URL";

/// Main DummyGen configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation service connection
    pub api: ApiConfig,

    /// Defaults for preview and download
    pub generation: GenerationConfig,

    /// Where the schema, catalog cache and output files live
    pub storage: StorageConfig,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(eyre::eyre!("api.base-url must start with http:// or https://, got '{}'", url));
        }
        if self.api.timeout_ms == 0 {
            return Err(eyre::eyre!("api.timeout-ms must be greater than zero"));
        }
        let count = self.generation.default_count;
        if !(MIN_RECORD_COUNT..=MAX_RECORD_COUNT).contains(&count) {
            return Err(eyre::eyre!(
                "generation.default-count must be between {} and {}, got {}",
                MIN_RECORD_COUNT,
                MAX_RECORD_COUNT,
                count
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .dummygen.yml
        let local_config = PathBuf::from(".dummygen.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/dummygen/dummygen.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("dummygen").join("dummygen.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::debug!(%url, "apply_overrides: api base url from environment");
            self.api.base_url = url;
        }
    }
}

/// Generation service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service base URL; endpoints live under `/api`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Defaults for preview and download
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Record count used when `--count` is not given
    #[serde(rename = "default-count")]
    pub default_count: u32,

    /// Download format used when `--format` is not given
    #[serde(rename = "default-format")]
    pub default_format: OutputFormat,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_count: 10,
            default_format: OutputFormat::Json,
        }
    }
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Schema being built
    #[serde(rename = "schema-path")]
    pub schema_path: PathBuf,

    /// Cached field catalog
    #[serde(rename = "catalog-path")]
    pub catalog_path: PathBuf,

    /// Directory downloads are written to
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dummygen")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            schema_path: data_dir().join("schema.json"),
            catalog_path: data_dir().join("catalog.json"),
            output_dir: PathBuf::from("."),
        }
    }
}

//! Generation request payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use crate::error::SchemaError;
use crate::normalize;
use crate::schema::Schema;
use crate::{MAX_RECORD_COUNT, MIN_RECORD_COUNT, PREVIEW_LIMIT};

/// Output format of a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// File extension for saved output
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown format: {} (expected json or csv)", s)),
        }
    }
}

/// Parse the free-text seed input
///
/// Blank input means no seed. Anything else must be an integer.
pub fn parse_seed(raw: &str) -> Result<Option<i64>, SchemaError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| SchemaError::InvalidSeed(raw.to_string()))
}

fn check_count(count: u32) -> Result<u32, SchemaError> {
    if (MIN_RECORD_COUNT..=MAX_RECORD_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(SchemaError::InvalidCount {
            count,
            min: MIN_RECORD_COUNT,
            max: MAX_RECORD_COUNT,
        })
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub schema: Map<String, Value>,
    pub count: u32,
    pub format: OutputFormat,
    pub seed: Option<i64>,
}

impl GenerationRequest {
    /// A sample request: JSON, at most [`PREVIEW_LIMIT`] records
    pub fn preview(schema: &Schema, requested: u32, seed: Option<i64>) -> Result<Self, SchemaError> {
        let count = check_count(requested)?.min(PREVIEW_LIMIT);
        debug!(requested, count, "GenerationRequest::preview: called");
        Self::build(schema, count, OutputFormat::Json, seed)
    }

    /// A full dataset request in the chosen format
    pub fn download(schema: &Schema, count: u32, format: OutputFormat, seed: Option<i64>) -> Result<Self, SchemaError> {
        debug!(count, %format, "GenerationRequest::download: called");
        Self::build(schema, check_count(count)?, format, seed)
    }

    fn build(schema: &Schema, count: u32, format: OutputFormat, seed: Option<i64>) -> Result<Self, SchemaError> {
        if schema.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        Ok(Self {
            schema: normalize::serialize(schema),
            count,
            format,
            seed,
        })
    }
}

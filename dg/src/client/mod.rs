//! Client for the DummyGen generation service
//!
//! The service is opaque: it advertises a field catalog and turns a
//! normalized schema into records. [`GenerationClient`] is the seam the
//! session talks to; [`HttpGenerationClient`] is the reqwest implementation.

use async_trait::async_trait;
use fieldkit::{FieldCatalog, GenerationRequest};

mod error;
mod http;
mod types;

pub use error::{ClientError, GENERIC_FAILURE};
pub use http::HttpGenerationClient;
pub use types::{GenerationOutput, HealthStatus, Record};

/// Remote generation service
///
/// Every call is a single request; failures are returned, never retried.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// `GET /api/fields`
    async fn fetch_catalog(&self) -> Result<FieldCatalog, ClientError>;

    /// `POST /api/generate`
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, ClientError>;

    /// `GET /api/health`
    async fn health(&self) -> Result<HealthStatus, ClientError>;
}

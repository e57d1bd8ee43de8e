//! reqwest implementation of the generation client

use async_trait::async_trait;
use fieldkit::{FieldCatalog, GenerationRequest, OutputFormat};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::types::GenerateResponse;
use super::{ClientError, GenerationClient, GenerationOutput, HealthStatus};
use crate::config::ApiConfig;

/// HTTP client for the generation service
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    base_url: String,
    http: Client,
}

impl HttpGenerationClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, ?timeout, "HttpGenerationClient::new: called");
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        Self::new(config.base_url.clone(), Duration::from_millis(config.timeout_ms))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Turn a non-success response into a remote error, pass others through
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %body, "check: error response");
        Err(ClientError::from_body(status.as_u16(), &body))
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn fetch_catalog(&self) -> Result<FieldCatalog, ClientError> {
        let url = self.url("fields");
        debug!(%url, "fetch_catalog: called");
        let response = Self::check(self.http.get(&url).send().await?).await?;
        let body: serde_json::Value = serde_json::from_str(&response.text().await?)
            .map_err(|e| ClientError::InvalidResponse(format!("field catalog is not JSON: {}", e)))?;
        let catalog = FieldCatalog::from_response(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        info!(field_types = catalog.len(), "fetch_catalog: loaded");
        Ok(catalog)
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, ClientError> {
        let url = self.url("generate");
        debug!(%url, count = request.count, format = %request.format, "generate: called");
        let response = Self::check(self.http.post(&url).json(request).send().await?).await?;
        let body = response.text().await?;

        match request.format {
            OutputFormat::Json => {
                let parsed: GenerateResponse = serde_json::from_str(&body)
                    .map_err(|e| ClientError::InvalidResponse(format!("expected {{\"data\": [...]}}: {}", e)))?;
                debug!(records = parsed.data.len(), "generate: json response");
                Ok(GenerationOutput::Records(parsed.data))
            }
            OutputFormat::Csv => {
                debug!(bytes = body.len(), "generate: csv response");
                Ok(GenerationOutput::Csv(body))
            }
        }
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.url("health");
        debug!(%url, "health: called");
        let response = Self::check(self.http.get(&url).send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

//! Request and response types exchanged with the generation service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One generated record; keys follow the schema's field order
pub type Record = Map<String, Value>;

/// Payload of a successful generation request
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutput {
    /// `format = "json"`: the `data` array of the response
    Records(Vec<Record>),
    /// `format = "csv"`: the response body as sent
    Csv(String),
}

impl GenerationOutput {
    /// Number of records (data rows for CSV)
    ///
    /// CSV is parsed rather than split on lines, since quoted cells may
    /// contain newlines.
    pub fn record_count(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Csv(text) => csv::ReaderBuilder::new()
                .has_headers(true)
                .from_reader(text.as_bytes())
                .records()
                .count(),
        }
    }
}

/// Body of a successful JSON `POST /api/generate` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateResponse {
    pub data: Vec<Record>,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_count_csv_skips_header_and_blank_lines() {
        let output = GenerationOutput::Csv("id,name\r\n1,a\r\n2,b\r\n\r\n".to_string());
        assert_eq!(output.record_count(), 2);
        assert_eq!(GenerationOutput::Csv(String::new()).record_count(), 0);
    }

    #[test]
    fn test_record_count_csv_multiline_cells() {
        let text = "id,description\r\n1,\"First para.\nSecond para.\"\r\n2,\"One.\nTwo.\nThree.\"\r\n";
        assert_eq!(GenerationOutput::Csv(text.to_string()).record_count(), 2);
    }

    #[test]
    fn test_generate_response_ignores_extra_members() {
        let body = r#"{"data": [{"b": 1, "a": 2}], "count": 1, "format": "json"}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let keys: Vec<_> = parsed.data[0].keys().cloned().collect();
        assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
    }
}

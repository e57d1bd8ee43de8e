//! Contract tests for HttpGenerationClient against a mock service
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `/api/fields` | `fetch_catalog_*` |
//! | POST | `/api/generate` | `generate_*` |
//! | GET | `/api/health` | `health_*` |

use std::time::Duration;

use dummygen::client::{ClientError, GENERIC_FAILURE, GenerationClient, GenerationOutput, HttpGenerationClient};
use fieldkit::{FieldCatalog, FieldDescriptor, FieldTypeSpec, GenerationRequest, OutputFormat, Schema};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpGenerationClient {
    HttpGenerationClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn schema() -> Schema {
    let catalog = FieldCatalog::from_specs([
        ("full_name", FieldTypeSpec::new("Full Name", "Identity")),
        ("integer", FieldTypeSpec::new("Integer", "IDs & System")),
    ]);
    let mut schema = Schema::new();
    schema.add_field(FieldDescriptor::new("name", "full_name"), &catalog).unwrap();
    schema
        .add_field(FieldDescriptor::new("age", "integer").with_constraint("min", 18), &catalog)
        .unwrap();
    schema
}

// ── GET /api/fields ─────────────────────────────────────────────────

#[tokio::test]
async fn fetch_catalog_bare_map() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first_name": {"label": "First Name", "category": "Identity"},
            "integer": {
                "label": "Integer",
                "category": "IDs & System",
                "constraints": [
                    {"name": "min", "type": "number", "label": "Minimum"},
                    {"name": "max", "type": "number", "label": "Maximum"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let catalog = client(&server).fetch_catalog().await.unwrap();
    assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["first_name", "integer"]);
    assert_eq!(catalog.categories(), ["Identity", "IDs & System"]);
    assert!(catalog.get("integer").unwrap().constraint("max").is_some());
}

#[tokio::test]
async fn fetch_catalog_nested_with_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": {
                "email": {"label": "Email", "category": "Contact"},
                "uuid": {"label": "UUID", "category": "IDs & System"}
            },
            "categories": ["IDs & System", "Contact"]
        })))
        .mount(&server)
        .await;

    let catalog = client(&server).fetch_catalog().await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.categories(), ["IDs & System", "Contact"]);
}

#[tokio::test]
async fn fetch_catalog_rejects_non_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_catalog().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

// ── POST /api/generate ──────────────────────────────────────────────

#[tokio::test]
async fn generate_json_sends_normalized_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "schema": {"name": "full_name", "age": {"type": "integer", "min": 18}},
            "count": 10,
            "format": "json",
            "seed": 7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "Ada Lovelace", "age": 36}, {"name": "Alan Turing", "age": 41}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = GenerationRequest::preview(&schema(), 25, Some(7)).unwrap();
    let output = client(&server).generate(&request).await.unwrap();
    match output {
        GenerationOutput::Records(records) => {
            assert_eq!(records.len(), 2);
            assert_eq!(records[0]["name"], "Ada Lovelace");
        }
        other => panic!("expected records, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_csv_passes_text_through() {
    let csv = "name,age\r\nAda Lovelace,36\r\nAlan Turing,41\r\n";
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv, "text/csv"))
        .mount(&server)
        .await;

    let request = GenerationRequest::download(&schema(), 2, OutputFormat::Csv, None).unwrap();
    let output = client(&server).generate(&request).await.unwrap();
    assert_eq!(output, GenerationOutput::Csv(csv.to_string()));
    assert_eq!(output.record_count(), 2);
}

#[tokio::test]
async fn generate_error_uses_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Unknown field type: bogus"})))
        .mount(&server)
        .await;

    let request = GenerationRequest::download(&schema(), 5, OutputFormat::Json, None).unwrap();
    let err = client(&server).generate(&request).await.unwrap_err();
    match err {
        ClientError::Remote { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Unknown field type: bogus");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_error_without_detail_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let request = GenerationRequest::download(&schema(), 5, OutputFormat::Json, None).unwrap();
    let err = client(&server).generate(&request).await.unwrap_err();
    assert!(err.is_remote());
    assert_eq!(err.user_message(), GENERIC_FAILURE);
}

#[tokio::test]
async fn generate_unreachable_service_is_transport_error() {
    let client = HttpGenerationClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let request = GenerationRequest::download(&schema(), 5, OutputFormat::Json, None).unwrap();
    let err = client.generate(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(!err.is_remote());
}

// ── GET /api/health ─────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy", "service": "dummygen"})))
        .mount(&server)
        .await;

    let status = client(&server).health().await.unwrap();
    assert!(status.is_healthy());
    assert_eq!(status.service, "dummygen");
}

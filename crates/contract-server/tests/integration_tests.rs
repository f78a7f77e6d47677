//! Integration tests for the HTTP service

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use contract_domain::{AnalysisResult, DraftResult, ExtractionResult, Severity};
use contract_drafting::{ClauseLibrary, Drafter};
use contract_extractor::{Extractor, ExtractorConfig};
use contract_llm::MockProvider;
use contract_review::Reviewer;
use contract_server::handlers::{create_router, AppState, ErrorResponse, HealthCheckResponse};
use serde::de::DeserializeOwned;
use std::path::Path;
use tower::ServiceExt; // for oneshot

const CONTRACT: &str = "SERVICES AGREEMENT\n\
This Agreement is made between Acme Corp and Beta LLC.\n\
Effective Date: 2025-01-01.\n\
The Customer shall pay $5,000.00 per month.\n\
The Vendor accepts unlimited liability for data loss.\n";

const POLICIES: &str = "\
- id: policy.confidentiality.required
  severity: high
  title: Confidentiality clause required
  clause_contains: confidential
- id: policy.parties.required
  severity: low
  field_required: parties
";

const BOUNDARY: &str = "contract-test-boundary";

fn extractor() -> Extractor<MockProvider> {
    Extractor::rules_only(Reviewer::default(), ExtractorConfig::default())
}

/// Router over a resources directory with the test policy file
fn create_app(resources: &Path, max_upload_bytes: usize) -> Router {
    std::fs::write(resources.join("policies.yaml"), POLICIES).unwrap();
    let drafter = Drafter::new(resources.join("templates"), ClauseLibrary::builtin());
    let state = AppState::new(
        extractor(),
        drafter,
        resources.join("policies.yaml"),
        max_upload_bytes,
    );
    create_router(state)
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn upload_request(uri: &str, field: &str, file_name: &str, contents: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send<T: DeserializeOwned>(app: Router, request: Request<Body>) -> (StatusCode, T) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, health): (_, HealthCheckResponse) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_extract_text() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request("/extract", serde_json::json!({ "text": CONTRACT }));

    let (status, result): (_, ExtractionResult) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.text, CONTRACT);
    let names: Vec<&str> = result
        .metadata
        .parties
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Acme Corp", "Beta LLC"]);
    assert_eq!(
        result.metadata.effective_date,
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
    );
}

#[tokio::test]
async fn test_extract_empty_text_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request("/extract", serde_json::json!({ "text": "" }));

    let (status, error): (_, ErrorResponse) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "Missing text");
}

#[tokio::test]
async fn test_extract_malformed_json_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/extract")
        .header("content-type", "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();

    let (status, _): (_, ErrorResponse) = send(create_app(dir.path(), 1024 * 1024), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_with_inline_policies() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request(
        "/analyze",
        serde_json::json!({
            "text": CONTRACT,
            "policies": [
                { "id": "policy.confidentiality", "severity": "high", "clause_contains": "confidential" }
            ]
        }),
    );

    let (status, result): (_, AnalysisResult) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.compliance.len(), 1);
    assert_eq!(result.compliance[0].policy_id, "policy.confidentiality");
    assert_eq!(result.compliance[0].severity, Severity::High);
}

#[tokio::test]
async fn test_analyze_uses_policy_file_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request("/analyze", serde_json::json!({ "text": CONTRACT }));

    let (status, result): (_, AnalysisResult) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = result
        .compliance
        .iter()
        .map(|c| c.policy_id.as_str())
        .collect();
    assert_eq!(ids, vec!["policy.confidentiality.required"]);
}

#[tokio::test]
async fn test_analyze_flags_unlimited_liability() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request(
        "/analyze",
        serde_json::json!({ "text": CONTRACT, "policies": [] }),
    );

    let (status, result): (_, AnalysisResult) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    let finding = result
        .risks
        .iter()
        .find(|r| r.id == "risk.limitation.none")
        .unwrap();
    assert_eq!(finding.severity, Severity::Critical);
    assert!(result.compliance.is_empty());
}

#[tokio::test]
async fn test_analyze_matches_extractor_without_llm() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request(
        "/analyze",
        serde_json::json!({ "text": CONTRACT, "policies": [] }),
    );

    let (_, served): (_, AnalysisResult) = send(create_app(dir.path(), 1024 * 1024), request).await;
    let direct = extractor().analyze(CONTRACT, &[]).await.unwrap();

    assert_eq!(served, direct);
}

#[tokio::test]
async fn test_draft_with_builtin_template() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request(
        "/draft",
        serde_json::json!({
            "contract_type": "nda",
            "variables": { "party_a": "Acme Corp", "party_b": "Beta LLC" },
            "clauses": ["governing_law"]
        }),
    );

    let (status, draft): (_, DraftResult) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft.used_clauses, vec!["governing_law"]);
    assert!(draft.content.contains("Acme Corp"));
    assert!(draft.content.contains("[Jurisdiction]"));
}

#[tokio::test]
async fn test_draft_unknown_clauses() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request(
        "/draft",
        serde_json::json!({ "contract_type": "base", "clauses": ["non_compete"] }),
    );

    let (status, draft): (_, DraftResult) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(draft.used_clauses.is_empty());
}

#[tokio::test]
async fn test_draft_missing_contract_type() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request("/draft", serde_json::json!({ "variables": {} }));

    let (status, _): (_, ErrorResponse) = send(create_app(dir.path(), 1024 * 1024), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extract_upload_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = upload_request("/extract/upload", "file", "services.txt", CONTRACT.as_bytes());

    let (status, result): (_, ExtractionResult) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.text, CONTRACT);
    assert_eq!(result.metadata.parties.len(), 2);
}

#[tokio::test]
async fn test_analyze_upload_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = upload_request("/analyze/upload", "file", "services.md", CONTRACT.as_bytes());

    let (status, result): (_, AnalysisResult) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result.risks.iter().any(|r| r.id == "risk.limitation.none"));
    assert_eq!(result.compliance.len(), 1);
}

#[tokio::test]
async fn test_upload_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let request = upload_request(
        "/extract/upload",
        "file",
        "scan.png",
        &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe, 0x00],
    );

    let (status, _): (_, ErrorResponse) = send(create_app(dir.path(), 1024 * 1024), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let dir = tempfile::tempdir().unwrap();
    let request = upload_request("/extract/upload", "document", "services.txt", b"text");

    let (status, error): (_, ErrorResponse) =
        send(create_app(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "Missing file");
}

#[tokio::test]
async fn test_request_body_limit() {
    let dir = tempfile::tempdir().unwrap();
    let request = json_request(
        "/extract",
        serde_json::json!({ "text": "x".repeat(4096) }),
    );

    let (status, _): (_, ErrorResponse) = send(create_app(dir.path(), 1024), request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

//! The CLI and the HTTP service produce the same analysis

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use contract_cli::cli::{AnalyzeArgs, SourceArgs};
use contract_cli::commands::analyze::run_analyze;
use contract_domain::AnalysisResult;
use contract_drafting::{ClauseLibrary, Drafter};
use contract_extractor::{Extractor, ExtractorConfig};
use contract_llm::MockProvider;
use contract_review::Reviewer;
use contract_server::handlers::{create_router, AppState};
use tower::ServiceExt; // for oneshot

const CONTRACT: &str = "MASTER SERVICES AGREEMENT\n\
This Agreement is made between Northwind Traders and Contoso Ltd.\n\
Effective Date: 3 February 2025.\n\
The Supplier shall deliver the services each month.\n\
The Customer shall pay USD 12,500.00 within thirty days.\n\
This Agreement renews by automatic renewal each year.\n\
Each party shall keep all information confidential.\n";

const POLICIES: &str = "\
- id: policy.confidentiality.required
  severity: high
  clause_contains: confidential
- id: policy.governing_law.required
  severity: medium
  field_required: governing_law
";

fn extractor() -> Extractor<MockProvider> {
    Extractor::rules_only(Reviewer::default(), ExtractorConfig::default())
}

#[tokio::test]
async fn test_cli_and_server_analyze_agree() {
    let dir = tempfile::tempdir().unwrap();
    let policies = dir.path().join("policies.yaml");
    std::fs::write(&policies, POLICIES).unwrap();

    let state = AppState::new(
        extractor(),
        Drafter::new(dir.path().join("templates"), ClauseLibrary::builtin()),
        policies.clone(),
        1024 * 1024,
    );
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "text": CONTRACT }).to_string()))
        .unwrap();

    let response = create_router(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let served: AnalysisResult = serde_json::from_slice(&body).unwrap();

    let args = AnalyzeArgs {
        source: SourceArgs {
            input: None,
            text: Some(CONTRACT.to_string()),
        },
        policies: None,
    };
    let cli = run_analyze(&extractor(), &args, &policies).await.unwrap();

    assert_eq!(served, cli);
    let ids: Vec<&str> = cli.compliance.iter().map(|c| c.policy_id.as_str()).collect();
    assert_eq!(ids, vec!["policy.governing_law.required"]);
}

#[tokio::test]
async fn test_cli_analyze_file_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("msa.txt");
    std::fs::write(&input, CONTRACT).unwrap();

    let args = AnalyzeArgs {
        source: SourceArgs {
            input: Some(input),
            text: None,
        },
        policies: None,
    };
    let from_file = run_analyze(&extractor(), &args, &dir.path().join("absent.yaml"))
        .await
        .unwrap();
    let from_text = extractor().analyze(CONTRACT, &[]).await.unwrap();

    assert_eq!(from_file, from_text);
    assert!(from_file
        .risks
        .iter()
        .any(|r| r.id == "risk.auto_renew.hidden"));
}

//! HTTP request handlers for the contract service.
//!
//! Implements extraction, analysis, drafting and health endpoints using axum.

use crate::upload::with_staged_upload;
use axum::{
    extract::{
        rejection::JsonRejection,
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use contract_domain::traits::LlmProvider;
use contract_domain::{AnalysisResult, DraftRequest, DraftResult, ExtractionResult, Policy};
use contract_drafting::{Drafter, DraftingError};
use contract_extractor::{load_text, read_policies, Extractor, ExtractorError, LoaderError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

/// Shared application state
pub struct AppState<L: LlmProvider> {
    /// Extractor shared by all extraction and analysis routes
    pub extractor: Arc<Extractor<L>>,
    /// Template renderer and clause library
    pub drafter: Arc<Drafter>,
    /// Policy file used when a request brings no policies
    pub policies_path: Arc<PathBuf>,
    /// Request body limit in bytes
    pub max_upload_bytes: usize,
}

impl<L: LlmProvider> AppState<L> {
    /// Create application state
    pub fn new(
        extractor: Extractor<L>,
        drafter: Drafter,
        policies_path: impl Into<PathBuf>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            extractor: Arc::new(extractor),
            drafter: Arc::new(drafter),
            policies_path: Arc::new(policies_path.into()),
            max_upload_bytes,
        }
    }
}

impl<L: LlmProvider> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            drafter: Arc::clone(&self.drafter),
            policies_path: Arc::clone(&self.policies_path),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// Extraction request
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Contract text
    #[serde(default)]
    pub text: Option<String>,
}

/// Analysis request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Contract text
    #[serde(default)]
    pub text: Option<String>,
    /// Policies to check; the policy file is used when absent
    #[serde(default)]
    pub policies: Option<Vec<Policy>>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Liveness status, always "ok"
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad request input
    #[error("{0}")]
    Validation(String),

    /// Request body over the configured limit
    #[error("{0}")]
    TooLarge(String),

    /// Extraction, loading or policy error
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// Drafting error
    #[error(transparent)]
    Drafting(#[from] DraftingError),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl From<LoaderError> for AppError {
    fn from(e: LoaderError) -> Self {
        AppError::Extractor(ExtractorError::Loader(e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(format!("Failed to stage upload: {}", e))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::rejected(e.status(), e.body_text())
    }
}

impl AppError {
    fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::TooLarge(message)
        } else {
            AppError::Validation(message)
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Extractor(ExtractorError::TextTooLong(..)) => StatusCode::BAD_REQUEST,
            AppError::Extractor(ExtractorError::Loader(LoaderError::UnsupportedFormat(_))) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::Extractor(ExtractorError::Loader(LoaderError::FileNotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            AppError::Extractor(_) | AppError::Drafting(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected ({}): {}", status, self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

fn require_text(text: Option<String>) -> Result<String, AppError> {
    text.filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Missing text".to_string()))
}

/// Read the `file` field of a multipart upload and load it as text
async fn load_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, AppError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        debug!("Received upload '{}' ({} bytes)", file_name, bytes.len());

        return tokio::task::spawn_blocking(move || {
            with_staged_upload(&file_name, &bytes, |path| Ok(load_text(path)?))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Upload task failed: {}", e)))?;
    }

    Err(AppError::Validation("Missing file".to_string()))
}

async fn policies_for<L: LlmProvider>(
    state: &AppState<L>,
    policies: Option<Vec<Policy>>,
) -> Result<Vec<Policy>, AppError> {
    match policies {
        Some(policies) => Ok(policies),
        None => Ok(read_policies(&state.policies_path).await?),
    }
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}

/// POST /extract - Extract metadata from text
async fn extract<L: LlmProvider + 'static>(
    State(state): State<AppState<L>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractionResult>, AppError> {
    let Json(request) = payload?;
    let text = require_text(request.text)?;
    Ok(Json(state.extractor.extract(&text).await?))
}

/// POST /extract/upload - Extract metadata from an uploaded document
async fn extract_upload<L: LlmProvider + 'static>(
    State(state): State<AppState<L>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractionResult>, AppError> {
    let text = load_upload(multipart).await?;
    Ok(Json(state.extractor.extract(&text).await?))
}

/// POST /analyze - Extract, flag risks and check policies
async fn analyze<L: LlmProvider + 'static>(
    State(state): State<AppState<L>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload?;
    let text = require_text(request.text)?;
    let policies = policies_for(&state, request.policies).await?;
    Ok(Json(state.extractor.analyze(&text, &policies).await?))
}

/// POST /analyze/upload - Analyze an uploaded document
async fn analyze_upload<L: LlmProvider + 'static>(
    State(state): State<AppState<L>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let text = load_upload(multipart).await?;
    let policies = policies_for(&state, None).await?;
    Ok(Json(state.extractor.analyze(&text, &policies).await?))
}

/// POST /draft - Render a contract from the clause library
async fn draft<L: LlmProvider + 'static>(
    State(state): State<AppState<L>>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<Json<DraftResult>, AppError> {
    let Json(request) = payload?;
    let drafter = Arc::clone(&state.drafter);
    let result = tokio::task::spawn_blocking(move || drafter.render(&request))
        .await
        .map_err(|e| AppError::Internal(format!("Drafting task failed: {}", e)))??;
    Ok(Json(result))
}

/// Create the axum router with all routes
pub fn create_router<L: LlmProvider + 'static>(state: AppState<L>) -> AxumRouter {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/extract", post(extract::<L>))
        .route("/extract/upload", post(extract_upload::<L>))
        .route("/analyze", post(analyze::<L>))
        .route("/analyze/upload", post(analyze_upload::<L>))
        .route("/draft", post(draft::<L>))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use contract_drafting::ClauseLibrary;
    use contract_extractor::ExtractorConfig;
    use contract_llm::MockProvider;
    use contract_review::Reviewer;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState<MockProvider> {
        let extractor = Extractor::rules_only(Reviewer::default(), ExtractorConfig::default());
        let drafter = Drafter::new("/nonexistent/templates", ClauseLibrary::builtin());
        AppState::new(extractor, drafter, "/nonexistent/policies.yaml", 1024 * 1024)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_extract_missing_text() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .method("POST")
            .uri("/extract")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_mapping() {
        let unsupported = AppError::from(LoaderError::UnsupportedFormat(".png".to_string()));
        assert_eq!(unsupported.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let missing = AppError::from(LoaderError::FileNotFound("x.txt".to_string()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let unreadable = AppError::from(LoaderError::Read("bad zip".to_string()));
        assert_eq!(unreadable.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let too_long = AppError::from(ExtractorError::TextTooLong(10, 5));
        assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
    }
}

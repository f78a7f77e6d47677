//! Contract AI HTTP Service
//!
//! Exposes extraction, analysis and drafting over HTTP. Every route shares
//! one [`Extractor`](contract_extractor::Extractor), so a request served
//! here and the same request run through the CLI produce the same result.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod upload;

use config::ServerConfig;
use contract_drafting::{Drafter, DraftingError};
use contract_extractor::Extractor;
use contract_llm::{GeminiProvider, LlmSettings};
use contract_review::Reviewer;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Clause library could not be loaded
    #[error("Failed to load clause library: {0}")]
    Drafting(#[from] DraftingError),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. Calling this twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The Gemini provider, when `GEMINI_API_KEY` is set.
///
/// Without it every request runs on the rule-based path.
pub fn gemini_from_env() -> Option<GeminiProvider> {
    let settings = LlmSettings::from_env();
    match GeminiProvider::from_env(&settings) {
        Ok(provider) => {
            info!("LLM enabled: {}", settings.model);
            Some(provider)
        }
        Err(e) => {
            warn!("LLM disabled, using rule-based extraction: {}", e);
            None
        }
    }
}

/// Build the shared application state from configuration.
pub fn build_state(config: &ServerConfig) -> Result<AppState<GeminiProvider>, ServerError> {
    let extractor = Extractor::new(
        gemini_from_env(),
        Reviewer::default(),
        config.extractor_config(),
    );
    let drafter = Drafter::from_resources(&config.resources_dir)?;
    info!(
        "Loaded {} clauses from {}",
        drafter.library().len(),
        config.resources_dir.display()
    );

    Ok(AppState::new(
        extractor,
        drafter,
        config.policies_path(),
        config.max_upload_bytes,
    ))
}

/// Start the HTTP server
///
/// Builds the application state and serves until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing();

    info!("Starting Contract AI server");
    info!("Bind address: {}", config.bind_addr());
    info!("Resources: {}", config.resources_dir.display());
    info!("LLM timeout: {} seconds", config.llm_timeout_secs);

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_from_resources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clauses.yaml"), "termination: Either party may terminate.\n")
            .unwrap();

        let mut config = ServerConfig::default_config();
        config.resources_dir = dir.path().to_path_buf();

        let state = build_state(&config).unwrap();
        assert_eq!(state.drafter.library().len(), 1);
        assert_eq!(*state.policies_path, dir.path().join("policies.yaml"));
        assert_eq!(state.max_upload_bytes, config.max_upload_bytes);
    }

    #[test]
    fn test_malformed_clause_library_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clauses.yaml"), "- not\n- a mapping\n").unwrap();

        let mut config = ServerConfig::default_config();
        config.resources_dir = dir.path().to_path_buf();

        assert!(matches!(build_state(&config), Err(ServerError::Drafting(_))));
    }
}

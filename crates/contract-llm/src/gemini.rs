//! Gemini Provider Implementation
//!
//! Talks to Google's `generateContent` REST API.
//!
//! # Features
//!
//! - Capability check at construction (`from_env` fails without an API key)
//! - Explicit request timeout
//! - One request per call; failures surface immediately so callers can fall back
//! - Optional prompt/response file logging
//!
//! # Examples
//!
//! ```no_run
//! use contract_llm::{GeminiProvider, LlmSettings};
//!
//! match GeminiProvider::from_env(&LlmSettings::from_env()) {
//!     Ok(provider) => println!("LLM enabled"),
//!     Err(e) => println!("rule-based only: {}", e),
//! }
//! ```

use crate::log::{LlmLog, LogKind};
use crate::settings::LlmSettings;
use crate::LlmError;
use contract_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    log: Option<LlmLog>,
}

/// Request body for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

/// Response from the generateContent API
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a provider from settings
    ///
    /// # Errors
    ///
    /// Returns `LlmError::NotConfigured` when no API key is set, or when the
    /// HTTP client cannot be built.
    pub fn from_env(settings: &LlmSettings) -> Result<Self, LlmError> {
        let api_key = settings.api_key.clone().ok_or_else(|| {
            LlmError::NotConfigured("GEMINI_API_KEY is not set".to_string())
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
            client,
            log: settings.log_file.clone().map(LlmLog::new),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn call(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        if let Some(log) = &self.log {
            log.record(LogKind::Prompt, &self.model, prompt).await;
        }

        let result = self.send(prompt, json_mode).await;

        if let Some(log) = &self.log {
            match &result {
                Ok(text) => log.record(LogKind::Response, &self.model, text).await,
                Err(e) => log.record(LogKind::Error, &self.model, &e.to_string()).await,
            }
        }

        result
    }

    async fn send(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: json_mode.then_some("application/json"),
            },
        };

        debug!("Gemini request to model '{}'", self.model);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<GenerateContentResponse>().await.map_err(|e| {
                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;
            return response_text(body);
        }

        Err(match status {
            reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
            reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
            _ => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                LlmError::Communication(format!("HTTP {}: {}", status, error_text))
            }
        })
    }
}

/// Concatenate the text parts of the first candidate
fn response_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::InvalidResponse("Empty response text".to_string()));
    }
    Ok(text)
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.call(prompt, false).await
    }

    async fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        // The schema travels inside the prompt; JSON mode constrains the output format
        self.call(prompt, true).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

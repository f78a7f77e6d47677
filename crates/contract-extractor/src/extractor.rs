//! Extraction and analysis orchestration

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::merge::{merge_for_analyze, merge_for_extract, merge_risks};
use crate::parser::{parse_llm_response, LlmAnalysis};
use crate::prompt::{PromptBuilder, RESPONSE_SCHEMA};
use crate::rules;
use contract_domain::traits::LlmProvider;
use contract_domain::{AnalysisResult, ExtractionResult, Policy};
use contract_review::Reviewer;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why the LLM path was not used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No provider was configured at startup
    NotConfigured,
    /// The provider returned an error
    Provider(String),
    /// The provider did not answer within the deadline
    Timeout,
    /// The response could not be coerced into metadata and risks
    InvalidResponse(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NotConfigured => write!(f, "LLM not configured"),
            FallbackReason::Provider(e) => write!(f, "provider error: {}", e),
            FallbackReason::Timeout => write!(f, "LLM request timed out"),
            FallbackReason::InvalidResponse(e) => write!(f, "invalid LLM response: {}", e),
        }
    }
}

/// Result of consulting the LLM
#[derive(Debug, Clone, PartialEq)]
pub enum LlmOutcome {
    /// The LLM produced usable metadata and risks
    Analyzed(LlmAnalysis),
    /// The rule path must answer on its own
    Fallback(FallbackReason),
}

/// Contract extractor and analyzer
///
/// Holds an optional LLM provider, decided once at construction. Every
/// operation runs the rule path; the LLM path is layered on top when
/// available and merged according to the operation.
pub struct Extractor<L: LlmProvider> {
    llm: Option<Arc<L>>,
    reviewer: Reviewer,
    config: ExtractorConfig,
}

impl<L: LlmProvider> Extractor<L> {
    /// Create a new extractor
    pub fn new(llm: Option<L>, reviewer: Reviewer, config: ExtractorConfig) -> Self {
        Self {
            llm: llm.map(Arc::new),
            reviewer,
            config,
        }
    }

    /// Create an extractor that never consults an LLM
    pub fn rules_only(reviewer: Reviewer, config: ExtractorConfig) -> Self {
        Self::new(None, reviewer, config)
    }

    /// Whether an LLM provider is configured
    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Ask the LLM for metadata and risks.
    ///
    /// Never fails: every problem becomes [`LlmOutcome::Fallback`] and is
    /// logged with its reason.
    pub async fn consult_llm(&self, text: &str) -> LlmOutcome {
        let Some(llm) = &self.llm else {
            debug!("No LLM configured, using rule-based extraction");
            return LlmOutcome::Fallback(FallbackReason::NotConfigured);
        };

        let prompt = PromptBuilder::new(text).build();
        debug!(
            "Consulting {} ({} byte prompt)",
            llm.model_name(),
            prompt.len()
        );

        let call = llm.generate_structured(&prompt, RESPONSE_SCHEMA);
        let reason = match tokio::time::timeout(self.config.llm_timeout(), call).await {
            Err(_) => FallbackReason::Timeout,
            Ok(Err(e)) => FallbackReason::Provider(e.to_string()),
            Ok(Ok(response)) => match parse_llm_response(&response) {
                Ok(analysis) => {
                    debug!(
                        "LLM returned {} parties, {} risks",
                        analysis.metadata.parties.len(),
                        analysis.risks.len()
                    );
                    return LlmOutcome::Analyzed(analysis);
                }
                Err(e) => FallbackReason::InvalidResponse(e.to_string()),
            },
        };

        warn!("Falling back to rule-based extraction: {}", reason);
        LlmOutcome::Fallback(reason)
    }

    /// Extract metadata from contract text
    pub async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractorError> {
        self.check_length(text)?;

        let rule_result = rules::extract(text);
        let result = match self.consult_llm(text).await {
            LlmOutcome::Analyzed(analysis) => ExtractionResult {
                metadata: merge_for_extract(analysis.metadata, &rule_result.metadata),
                text: rule_result.text,
            },
            LlmOutcome::Fallback(_) => rule_result,
        };

        info!(
            "Extracted {} parties, {} amounts, {} obligations",
            result.metadata.parties.len(),
            result.metadata.amounts.len(),
            result.metadata.obligations.len()
        );
        Ok(result)
    }

    /// Extract metadata, then flag risks and check policies
    pub async fn analyze(
        &self,
        text: &str,
        policies: &[Policy],
    ) -> Result<AnalysisResult, ExtractorError> {
        self.check_length(text)?;

        let rule_metadata = rules::extract_metadata(text);
        let (metadata, risks) = match self.consult_llm(text).await {
            LlmOutcome::Analyzed(analysis) => {
                let metadata = merge_for_analyze(analysis.metadata, &rule_metadata);
                let rule_risks = self.reviewer.assess_risks(text, &metadata);
                (metadata, merge_risks(analysis.risks, rule_risks))
            }
            LlmOutcome::Fallback(_) => {
                let risks = self.reviewer.assess_risks(text, &rule_metadata);
                (rule_metadata, risks)
            }
        };

        let compliance = self.reviewer.check_compliance(&metadata, text, policies);
        info!(
            "Analysis complete: {} risks, {} compliance issues ({} policies)",
            risks.len(),
            compliance.len(),
            policies.len()
        );

        Ok(AnalysisResult {
            metadata,
            risks,
            compliance,
        })
    }

    /// Load a document and extract from it
    pub async fn extract_file(&self, path: &Path) -> Result<ExtractionResult, ExtractorError> {
        let text = crate::loader::read_document(path.to_path_buf()).await?;
        self.extract(&text).await
    }

    /// Load a document and analyze it
    pub async fn analyze_file(
        &self,
        path: &Path,
        policies: &[Policy],
    ) -> Result<AnalysisResult, ExtractorError> {
        let text = crate::loader::read_document(path.to_path_buf()).await?;
        self.analyze(&text, policies).await
    }

    fn check_length(&self, text: &str) -> Result<(), ExtractorError> {
        if text.len() > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                text.len(),
                self.config.max_text_length,
            ));
        }
        Ok(())
    }
}

impl<L: LlmProvider> Clone for Extractor<L> {
    fn clone(&self) -> Self {
        Self {
            llm: self.llm.clone(),
            reviewer: self.reviewer.clone(),
            config: self.config.clone(),
        }
    }
}

/// Load policies on the blocking pool
pub async fn read_policies(path: &Path) -> Result<Vec<Policy>, ExtractorError> {
    let path = path.to_path_buf();
    let policies = tokio::task::spawn_blocking(move || contract_review::load_policies(path))
        .await
        .map_err(|e| ExtractorError::Task(e.to_string()))??;
    Ok(policies)
}

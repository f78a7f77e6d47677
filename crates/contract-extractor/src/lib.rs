//! Contract AI Extractor
//!
//! Turns contract documents into structured metadata, risk findings and
//! compliance issues.
//!
//! # Architecture
//!
//! ```text
//! File → Loader → Text ─┬→ Rule Extractor ─────────────┐
//!                       └→ LLM → JSON coercion → Merge ─┴→ Reviewer → Result
//! ```
//!
//! The LLM path is optional. When no provider is configured, or when the
//! provider fails in any way, [`Extractor::consult_llm`] returns
//! [`LlmOutcome::Fallback`] and the request is answered entirely by the
//! rule-based path.
//!
//! # Example Usage
//!
//! ```no_run
//! use contract_extractor::{Extractor, ExtractorConfig};
//! use contract_llm::MockProvider;
//! use contract_review::Reviewer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor: Extractor<MockProvider> =
//!     Extractor::rules_only(Reviewer::default(), ExtractorConfig::default());
//!
//! let result = extractor
//!     .extract("This Agreement is made between Acme Corp and Beta LLC.")
//!     .await?;
//! println!("Parties: {:?}", result.metadata.parties);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod dates;
mod error;
mod extractor;
mod loader;
mod merge;
mod parser;
mod prompt;
mod rules;


pub use config::ExtractorConfig;
pub use dates::parse_date;
pub use error::{ExtractorError, LoaderError};
pub use extractor::{read_policies, Extractor, FallbackReason, LlmOutcome};
pub use loader::{load_bytes, load_text, read_document, DocumentKind};
pub use merge::{merge_for_analyze, merge_for_extract, merge_risks};
pub use parser::{parse_llm_response, LlmAnalysis};
pub use prompt::{PromptBuilder, RESPONSE_SCHEMA};
pub use rules::{
    extract, extract_amounts, extract_dates, extract_metadata, extract_obligations,
    extract_parties, ContractDates,
};

//! Contract AI Domain Layer
//!
//! Value records shared by every other crate in the workspace, plus the trait
//! seam behind which LLM providers live.
//!
//! ## Key Concepts
//!
//! - **Metadata**: structured facts extracted from a contract
//! - **Risk finding**: a flagged clause pattern or absence indicating risk
//! - **Policy / compliance issue**: a declarative requirement and its violation
//! - **Results**: the response records of the extract, analyze and draft operations
//!
//! All records are immutable values built once per request; nothing here is
//! persisted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compliance;
pub mod metadata;
pub mod results;
pub mod risk;
pub mod traits;

// Re-exports for convenience
pub use compliance::{ComplianceIssue, Policy};
pub use metadata::{ExtractedParty, Metadata, Obligation};
pub use results::{AnalysisResult, DraftRequest, DraftResult, ExtractionResult};
pub use risk::{RiskFinding, Severity};

//! Request and response records for the extract, analyze and draft operations

use crate::{ComplianceIssue, Metadata, RiskFinding};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of metadata extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The text that was analyzed
    pub text: String,

    /// Extracted metadata
    pub metadata: Metadata,
}

/// Result of risk and compliance analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata the analysis ran against
    pub metadata: Metadata,

    /// Risk findings
    pub risks: Vec<RiskFinding>,

    /// Unsatisfied policies
    pub compliance: Vec<ComplianceIssue>,
}

/// Request to draft a contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    /// Contract type, used to pick a template
    pub contract_type: String,

    /// Template variables
    #[serde(default)]
    pub variables: Map<String, Value>,

    /// Clause keys to include; all clauses when absent or empty
    #[serde(default)]
    pub clauses: Option<Vec<String>>,
}

/// A rendered contract draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResult {
    /// Rendered contract text
    pub content: String,

    /// Keys of the clauses included, in library order
    pub used_clauses: Vec<String>,
}

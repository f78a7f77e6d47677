//! Contract AI Review
//!
//! Rule-based quality gate for contracts:
//! - Risk analysis: an ordered table of pattern and structural rules
//! - Compliance checking: declarative policies evaluated against text + metadata
//! - Policy loading from YAML or JSON files
//!
//! # Examples
//!
//! ```
//! use contract_review::{Reviewer, ReviewConfig};
//! use contract_domain::Metadata;
//!
//! let reviewer = Reviewer::new(ReviewConfig::default());
//! let findings = reviewer.assess_risks("Vendor accepts unlimited liability.", &Metadata::default());
//! assert_eq!(findings[0].id, "risk.limitation.none");
//! ```

#![warn(missing_docs)]

mod compliance;
mod config;
mod error;
mod risk;

pub use compliance::{check_compliance, load_policies, parse_policies, PolicyFormat};
pub use config::ReviewConfig;
pub use error::ReviewError;
pub use risk::{assess_risks, RiskRule, RuleCheck, RISK_RULES};

use contract_domain::{ComplianceIssue, Metadata, Policy, RiskFinding};

/// Runs risk rules and compliance policies with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Reviewer {
    config: ReviewConfig,
}

impl Reviewer {
    /// Create a new Reviewer with the given configuration
    pub fn new(config: ReviewConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Flag risk patterns in the text, in rule order
    pub fn assess_risks(&self, text: &str, metadata: &Metadata) -> Vec<RiskFinding> {
        assess_risks(text, metadata, &self.config)
    }

    /// Evaluate policies; satisfied policies produce nothing
    pub fn check_compliance(
        &self,
        metadata: &Metadata,
        text: &str,
        policies: &[Policy],
    ) -> Vec<ComplianceIssue> {
        check_compliance(metadata, text, policies)
    }
}

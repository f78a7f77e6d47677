//! Compliance checking against declarative policies

use crate::error::ReviewError;
use contract_domain::{ComplianceIssue, Metadata, Policy};
use std::path::Path;
use tracing::debug;

/// On-disk policy file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// anything else
    Json,
}

impl PolicyFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => PolicyFormat::Yaml,
            _ => PolicyFormat::Json,
        }
    }
}

/// Load policies from a file. A missing file means no policies.
pub fn load_policies(path: impl AsRef<Path>) -> Result<Vec<Policy>, ReviewError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("Policy file {} not found, using no policies", path.display());
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path)?;
    parse_policies(&contents, PolicyFormat::from_path(path))
}

/// Parse a policy list. An empty YAML document means no policies.
pub fn parse_policies(contents: &str, format: PolicyFormat) -> Result<Vec<Policy>, ReviewError> {
    match format {
        PolicyFormat::Yaml => {
            if contents.trim().is_empty() {
                return Ok(Vec::new());
            }
            let policies: Option<Vec<Policy>> =
                serde_yaml::from_str(contents).map_err(|e| ReviewError::Parse(e.to_string()))?;
            Ok(policies.unwrap_or_default())
        }
        PolicyFormat::Json => {
            serde_json::from_str(contents).map_err(|e| ReviewError::Parse(e.to_string()))
        }
    }
}

/// Evaluate every policy against the text and metadata
pub fn check_compliance(metadata: &Metadata, text: &str, policies: &[Policy]) -> Vec<ComplianceIssue> {
    let lower = text.to_lowercase();
    let mut issues = Vec::new();

    for policy in policies {
        let mut findings = Vec::new();

        if let Some(clause) = policy.clause_contains.as_deref().filter(|c| !c.is_empty()) {
            if !lower.contains(&clause.to_lowercase()) {
                findings.push(format!("Missing clause containing: '{}'", clause));
            }
        }

        if let Some(field) = policy.field_required.as_deref().filter(|f| !f.is_empty()) {
            if !metadata.field_is_present(field) {
                findings.push(format!("Missing field: {}", field));
            }
        }

        if !findings.is_empty() {
            issues.push(ComplianceIssue {
                policy_id: policy.id.clone(),
                title: policy.title.clone(),
                severity: policy.severity,
                requirement: policy.requirement.clone(),
                finding: findings.join("; "),
            });
        }
    }

    issues
}

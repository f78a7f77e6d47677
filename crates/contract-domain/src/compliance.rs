//! Declarative policies and the issues raised against them

use crate::risk::Severity;
use serde::{Deserialize, Deserializer, Serialize};

/// A compliance requirement loaded from `policies.yaml`/`.json` or sent with a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Policy identifier
    #[serde(default = "default_policy_id")]
    pub id: String,

    /// Severity reported when the policy is not satisfied
    ///
    /// Parsed case-insensitively; levels outside the four known ones fall
    /// back to `medium`.
    #[serde(
        default = "default_policy_severity",
        deserialize_with = "lenient_severity"
    )]
    pub severity: Severity,

    /// Short title
    #[serde(default = "default_policy_title")]
    pub title: String,

    /// Human-readable requirement
    #[serde(default)]
    pub requirement: String,

    /// Substring the contract text must contain (case-insensitive)
    #[serde(default)]
    pub clause_contains: Option<String>,

    /// Metadata field that must be present
    #[serde(default)]
    pub field_required: Option<String>,
}

fn default_policy_id() -> String {
    "policy.unknown".to_string()
}

fn default_policy_severity() -> Severity {
    Severity::Medium
}

fn lenient_severity<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(Severity::parse)
        .unwrap_or_else(default_policy_severity))
}

fn default_policy_title() -> String {
    "Policy requirement".to_string()
}

/// A policy found unsatisfied against a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    /// Identifier of the violated policy
    pub policy_id: String,

    /// Policy title
    pub title: String,

    /// Policy severity
    pub severity: Severity,

    /// Requirement text
    pub requirement: String,

    /// What was missing
    pub finding: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let policy: Policy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy.id, "policy.unknown");
        assert_eq!(policy.severity, Severity::Medium);
        assert_eq!(policy.title, "Policy requirement");
        assert_eq!(policy.requirement, "");
        assert!(policy.clause_contains.is_none());
        assert!(policy.field_required.is_none());
    }

    #[test]
    fn test_policy_severity_is_case_insensitive() {
        let policy: Policy = serde_json::from_str(r#"{"severity": "High"}"#).unwrap();
        assert_eq!(policy.severity, Severity::High);

        let policy: Policy = serde_json::from_str(r#"{"severity": " CRITICAL "}"#).unwrap();
        assert_eq!(policy.severity, Severity::Critical);
    }

    #[test]
    fn test_policy_custom_severity_falls_back_to_medium() {
        let policy: Policy =
            serde_json::from_str(r#"{"id": "p1", "severity": "blocker"}"#).unwrap();
        assert_eq!(policy.id, "p1");
        assert_eq!(policy.severity, Severity::Medium);

        let policy: Policy = serde_json::from_str(r#"{"severity": null}"#).unwrap();
        assert_eq!(policy.severity, Severity::Medium);
    }
}

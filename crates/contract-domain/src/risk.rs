//! Risk findings and severity levels

use serde::{Deserialize, Serialize};

/// Severity of a risk finding or policy violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Low,

    /// Worth reviewing
    Medium,

    /// Should be negotiated
    High,

    /// Blocks signature
    Critical,
}

impl Severity {
    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Parse a severity, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid severity: {}", s))
    }
}

/// A flagged clause pattern or absence indicating legal or business risk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    /// Stable rule identifier (e.g., `risk.limitation.none`)
    pub id: String,

    /// How serious the finding is
    pub severity: Severity,

    /// Short title
    pub title: String,

    /// Explanation
    pub detail: String,

    /// Text surrounding the match, if the finding came from a pattern
    #[serde(default)]
    pub clause_snippet: Option<String>,

    /// Supporting references
    #[serde(default)]
    pub references: Vec<String>,
}

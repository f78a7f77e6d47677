//! Risk analysis rules

use crate::config::ReviewConfig;
use contract_domain::{Metadata, RiskFinding, Severity};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// How a rule decides whether it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCheck {
    /// Case-insensitive pattern over the contract text
    Pattern(&'static str),

    /// Neither governing law nor jurisdiction present in metadata
    MissingGoverningLaw,

    /// No expiration date in metadata and no mention of termination
    OpenEndedTerm,
}

/// A single entry of the risk rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskRule {
    /// Finding identifier
    pub id: &'static str,
    /// Finding severity
    pub severity: Severity,
    /// Finding title
    pub title: &'static str,
    /// Finding detail
    pub detail: &'static str,
    /// Trigger
    pub check: RuleCheck,
}

/// The ordered rule table. Findings are emitted in this order.
pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        id: "risk.indemnity.broad",
        severity: Severity::High,
        title: "Broad indemnity",
        detail: "Indemnity appears overly broad (any/all claims). Consider limiting scope and caps.",
        check: RuleCheck::Pattern(r"indemnif(y|ies|ication).{0,80}(any|all)\s+claims"),
    },
    RiskRule {
        id: "risk.limitation.none",
        severity: Severity::Critical,
        title: "Missing limitation of liability",
        detail: "Limitation of liability missing or unlimited.",
        check: RuleCheck::Pattern(r"no\s+limitation\s+of\s+liability|unlimited\s+liability"),
    },
    RiskRule {
        id: "risk.auto_renew.hidden",
        severity: Severity::Medium,
        title: "Automatic renewal",
        detail: "Automatic renewal detected; ensure notice windows are acceptable.",
        check: RuleCheck::Pattern(r"auto(matic)?\s+renew(al|s)\b"),
    },
    RiskRule {
        id: "risk.governing_law.missing",
        severity: Severity::Medium,
        title: "Governing law missing",
        detail: "No governing law/jurisdiction detected.",
        check: RuleCheck::MissingGoverningLaw,
    },
];

const OPEN_ENDED_TERM: RiskRule = RiskRule {
    id: "risk.term.open_ended",
    severity: Severity::High,
    title: "Open-ended term",
    detail: "No expiration/termination detected; may be open-ended.",
    check: RuleCheck::OpenEndedTerm,
};

/// Compiled patterns, index-aligned with `RISK_RULES`
static COMPILED: Lazy<Vec<Option<Regex>>> = Lazy::new(|| {
    RISK_RULES
        .iter()
        .map(|rule| match rule.check {
            RuleCheck::Pattern(pattern) => Some(
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
                    .expect("risk rule pattern must compile"),
            ),
            RuleCheck::MissingGoverningLaw | RuleCheck::OpenEndedTerm => None,
        })
        .collect()
});

/// Run the rule table, then the open-ended term heuristic
pub fn assess_risks(text: &str, metadata: &Metadata, config: &ReviewConfig) -> Vec<RiskFinding> {
    let mut findings = Vec::new();

    for (rule, regex) in RISK_RULES.iter().zip(COMPILED.iter()) {
        match (rule.check, regex) {
            (RuleCheck::MissingGoverningLaw, _) => {
                if !(metadata.field_is_present("governing_law")
                    || metadata.field_is_present("jurisdiction"))
                {
                    findings.push(finding(rule, None));
                }
            }
            (RuleCheck::Pattern(_), Some(regex)) => {
                if let Some(m) = regex.find(text) {
                    let clause = snippet(text, m.start(), m.end(), config.snippet_radius);
                    findings.push(finding(rule, Some(clause)));
                }
            }
            (RuleCheck::OpenEndedTerm, _) | (RuleCheck::Pattern(_), None) => {}
        }
    }

    if config.detect_open_ended_term
        && metadata.expiration_date.is_none()
        && !text.to_lowercase().contains("termination")
    {
        findings.push(finding(&OPEN_ENDED_TERM, None));
    }

    findings
}

fn finding(rule: &RiskRule, clause_snippet: Option<String>) -> RiskFinding {
    RiskFinding {
        id: rule.id.to_string(),
        severity: rule.severity,
        title: rule.title.to_string(),
        detail: rule.detail.to_string(),
        clause_snippet,
        references: Vec::new(),
    }
}

/// Text from `radius` characters before `start` to `radius` characters after `end`
fn snippet(text: &str, start: usize, end: usize, radius: usize) -> String {
    let begin = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(i, _)| i);
    let finish = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);
    text[begin..finish].to_string()
}

//! Rule-based metadata extraction
//!
//! Deterministic regex heuristics that run on every request. Their output
//! answers the request on its own when the LLM path falls back, and
//! backfills LLM output otherwise.

use crate::dates::parse_date;
use chrono::NaiveDate;
use contract_domain::{ExtractedParty, ExtractionResult, Metadata, Obligation};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const EFFECTIVE_LABELS: &[&str] = &["effective date", "effective as of", "berlaku sejak"];
const EXECUTION_LABELS: &[&str] = &["date of execution", "executed on", "ditandatangani pada"];
const EXPIRATION_LABELS: &[&str] = &["expires on", "expiration", "berakhir pada"];

/// Unlabelled date shapes, tried in order for the effective date
const GENERIC_DATE_PATTERNS: &[&str] = &[
    r"\b\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4}\b",
    r"\b\d{4}-\d{2}-\d{2}\b",
    r"\b\d{1,2}/\d{1,2}/\d{2,4}\b",
];

static PARTIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)between\s+(.*?)\s+and\s+(.*?)[.,\n]").expect("valid parties regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static AMOUNTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:USD|Rp|IDR|\$)\s?\d{1,3}(?:[.,]\d{3})*(?:[.,]\d{2})?")
        .expect("valid amounts regex")
});

static OBLIGATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(shall|must|wajib)\b(.{0,200})").expect("valid obligations regex")
});

static GENERIC_DATES: Lazy<Vec<Regex>> = Lazy::new(|| {
    GENERIC_DATE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("valid generic date regex"))
        .collect()
});

fn label_regexes(labels: &[&str]) -> Vec<Regex> {
    labels
        .iter()
        .map(|label| {
            Regex::new(&format!(r"(?i){}[:\s]+(.{{0,40}})", regex::escape(label)))
                .expect("valid date label regex")
        })
        .collect()
}

static EFFECTIVE: Lazy<Vec<Regex>> = Lazy::new(|| label_regexes(EFFECTIVE_LABELS));
static EXECUTION: Lazy<Vec<Regex>> = Lazy::new(|| label_regexes(EXECUTION_LABELS));
static EXPIRATION: Lazy<Vec<Regex>> = Lazy::new(|| label_regexes(EXPIRATION_LABELS));

/// The three contract dates found by label search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContractDates {
    /// Effective date
    pub effective: Option<NaiveDate>,
    /// Execution (signing) date
    pub execution: Option<NaiveDate>,
    /// Expiration date
    pub expiration: Option<NaiveDate>,
}

/// Up to two parties from the first "between X and Y" phrase
pub fn extract_parties(text: &str) -> Vec<ExtractedParty> {
    let Some(caps) = PARTIES.captures(text) else {
        return Vec::new();
    };

    [(1, "Party A"), (2, "Party B")]
        .into_iter()
        .filter_map(|(group, role)| {
            let name = clean_party(caps.get(group)?.as_str());
            (!name.is_empty()).then(|| ExtractedParty::new(name, role))
        })
        .collect()
}

fn clean_party(raw: &str) -> String {
    WHITESPACE
        .replace_all(raw, " ")
        .trim_matches(|c| c == ' ' || c == '"')
        .to_string()
}

/// The first label (in order) whose trailing snippet parses as a date
fn first_labelled_date(text: &str, labels: &[Regex]) -> Option<NaiveDate> {
    labels.iter().find_map(|regex| {
        let snippet = regex.captures(text)?.get(1)?.as_str();
        parse_date(snippet)
    })
}

/// Effective, execution and expiration dates
pub fn extract_dates(text: &str) -> ContractDates {
    let mut dates = ContractDates {
        effective: first_labelled_date(text, &EFFECTIVE),
        execution: first_labelled_date(text, &EXECUTION),
        expiration: first_labelled_date(text, &EXPIRATION),
    };

    if dates.effective.is_none() {
        dates.effective = GENERIC_DATES
            .iter()
            .find_map(|regex| parse_date(regex.find(text)?.as_str()));
    }

    dates
}

/// Currency amounts, de-duplicated in first-seen order
pub fn extract_amounts(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    AMOUNTS
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|amount| seen.insert(amount.clone()))
        .collect()
}

/// One obligation per "shall"/"must"/"wajib" occurrence
pub fn extract_obligations(text: &str) -> Vec<Obligation> {
    OBLIGATIONS
        .find_iter(text)
        .map(|m| Obligation::new(m.as_str().trim()))
        .collect()
}

/// Run every rule over the text
pub fn extract_metadata(text: &str) -> Metadata {
    let dates = extract_dates(text);
    Metadata {
        effective_date: dates.effective,
        execution_date: dates.execution,
        expiration_date: dates.expiration,
        parties: extract_parties(text),
        amounts: extract_amounts(text),
        obligations: extract_obligations(text),
        ..Default::default()
    }
}

/// Rule-only extraction result
pub fn extract(text: &str) -> ExtractionResult {
    ExtractionResult {
        text: text.to_string(),
        metadata: extract_metadata(text),
    }
}

//! Combining LLM output with rule output
//!
//! The two operations weigh the sources differently. Extraction trusts the
//! LLM and only backfills gaps from the rules; analysis prefers the rules
//! for dates, amounts and obligations because those feed the risk and
//! compliance checks, but keeps the LLM's parties.

use contract_domain::{Metadata, RiskFinding};
use std::collections::HashSet;

fn or_rules<T: Clone>(llm: Option<T>, rules: &Option<T>) -> Option<T> {
    llm.or_else(|| rules.clone())
}

fn non_empty_or<T: Clone>(primary: Vec<T>, secondary: &[T]) -> Vec<T> {
    if primary.is_empty() {
        secondary.to_vec()
    } else {
        primary
    }
}

/// Merge for `extract`: LLM values win, empty ones are backfilled
pub fn merge_for_extract(llm: Metadata, rules: &Metadata) -> Metadata {
    Metadata {
        effective_date: or_rules(llm.effective_date, &rules.effective_date),
        execution_date: or_rules(llm.execution_date, &rules.execution_date),
        expiration_date: or_rules(llm.expiration_date, &rules.expiration_date),
        parties: non_empty_or(llm.parties, &rules.parties),
        amounts: non_empty_or(llm.amounts, &rules.amounts),
        obligations: non_empty_or(llm.obligations, &rules.obligations),
        ..llm
    }
}

/// Merge for `analyze`: rule dates, amounts and obligations win when present
pub fn merge_for_analyze(llm: Metadata, rules: &Metadata) -> Metadata {
    Metadata {
        effective_date: rules.effective_date.or(llm.effective_date),
        execution_date: rules.execution_date.or(llm.execution_date),
        expiration_date: rules.expiration_date.or(llm.expiration_date),
        amounts: if rules.amounts.is_empty() {
            llm.amounts
        } else {
            rules.amounts.clone()
        },
        obligations: if rules.obligations.is_empty() {
            llm.obligations
        } else {
            rules.obligations.clone()
        },
        ..llm
    }
}

/// Combine LLM and rule findings, keyed by id.
///
/// A repeated LLM id keeps the first position but takes the later value.
/// Rule findings are appended only for ids the LLM did not report.
pub fn merge_risks(llm: Vec<RiskFinding>, rules: Vec<RiskFinding>) -> Vec<RiskFinding> {
    let mut merged: Vec<RiskFinding> = Vec::with_capacity(llm.len() + rules.len());

    for finding in llm {
        match merged.iter_mut().find(|existing| existing.id == finding.id) {
            Some(existing) => *existing = finding,
            None => merged.push(finding),
        }
    }

    let llm_ids: HashSet<String> = merged.iter().map(|f| f.id.clone()).collect();
    merged.extend(rules.into_iter().filter(|f| !llm_ids.contains(&f.id)));

    merged
}

//! Draft command implementation.

use crate::cli::DraftArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use contract_domain::{DraftRequest, DraftResult};
use contract_drafting::Drafter;
use serde_json::{Map, Value};

/// Build a draft request from command-line arguments.
///
/// `party_a` and `party_b` override any `--var` of the same name.
pub fn draft_request(args: &DraftArgs) -> DraftRequest {
    let mut variables: Map<String, Value> = args
        .variables
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    variables.insert("party_a".to_string(), Value::String(args.party_a.clone()));
    variables.insert("party_b".to_string(), Value::String(args.party_b.clone()));

    DraftRequest {
        contract_type: args.contract_type.clone(),
        variables,
        clauses: args.clauses.clone(),
    }
}

/// Render a draft with the given drafter.
pub fn run_draft(drafter: &Drafter, args: &DraftArgs) -> Result<DraftResult> {
    Ok(drafter.render(&draft_request(args))?)
}

/// Summary line for a rendered draft, printed to stderr.
pub fn draft_summary(formatter: &Formatter, result: &DraftResult) -> String {
    if result.used_clauses.is_empty() {
        return formatter.success("Drafted contract with no clauses");
    }
    formatter.success(&format!(
        "Drafted {} clause(s): {}",
        result.used_clauses.len(),
        result.used_clauses.join(", ")
    ))
}

/// Execute the draft command.
///
/// The contract goes to stdout so it can be redirected; the summary goes to stderr.
pub fn execute_draft(args: DraftArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let drafter = Drafter::from_resources(&config.resources_dir)?;
    let result = run_draft(&drafter, &args)?;
    println!("{}", result.content);
    eprintln!("{}", draft_summary(formatter, &result));
    Ok(())
}

//! Analyze command implementation.

use super::{build_extractor, read_source};
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use contract_domain::traits::LlmProvider;
use contract_domain::AnalysisResult;
use contract_extractor::{read_policies, Extractor};
use std::path::Path;
use tracing::debug;

/// Analyze the selected source.
///
/// An explicit `--policies` file must exist; otherwise `default_policies`
/// is used, and a missing default means no policies.
pub async fn run_analyze<L: LlmProvider>(
    extractor: &Extractor<L>,
    args: &AnalyzeArgs,
    default_policies: &Path,
) -> Result<AnalysisResult> {
    let policies_path = match &args.policies {
        Some(path) if !path.exists() => {
            return Err(CliError::InvalidInput(format!(
                "Policy file not found: {}",
                path.display()
            )))
        }
        Some(path) => path.as_path(),
        None => default_policies,
    };

    let text = read_source(&args.source).await?;
    let policies = read_policies(policies_path).await?;
    debug!(
        "Checking {} policies from {}",
        policies.len(),
        policies_path.display()
    );

    Ok(extractor.analyze(&text, &policies).await?)
}

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = build_extractor(config);
    let result = run_analyze(&extractor, &args, &config.policies_path()).await?;
    println!("{}", formatter.format_analysis(&result)?);
    Ok(())
}

//! Extract command implementation.

use super::{build_extractor, read_source};
use crate::cli::SourceArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use contract_domain::traits::LlmProvider;
use contract_domain::ExtractionResult;
use contract_extractor::Extractor;

/// Extract metadata from the selected source.
pub async fn run_extract<L: LlmProvider>(
    extractor: &Extractor<L>,
    source: &SourceArgs,
) -> Result<ExtractionResult> {
    let text = read_source(source).await?;
    Ok(extractor.extract(&text).await?)
}

/// Execute the extract command.
pub async fn execute_extract(args: SourceArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = build_extractor(config);
    let result = run_extract(&extractor, &args).await?;
    println!("{}", formatter.format_extraction(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_extractor::ExtractorConfig;
    use contract_llm::MockProvider;
    use contract_review::Reviewer;

    #[tokio::test]
    async fn test_run_extract_from_text() {
        let extractor: Extractor<MockProvider> =
            Extractor::rules_only(Reviewer::default(), ExtractorConfig::default());
        let source = SourceArgs {
            input: None,
            text: Some("This Agreement is made between Acme Corp and Beta LLC.".to_string()),
        };

        let result = run_extract(&extractor, &source).await.unwrap();
        assert_eq!(result.metadata.parties.len(), 2);
        assert_eq!(result.metadata.parties[0].name, "Acme Corp");
    }
}

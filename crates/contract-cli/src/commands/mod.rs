//! Command implementations.

pub mod analyze;
pub mod draft;
pub mod extract;
pub mod serve;

pub use self::analyze::execute_analyze;
pub use self::draft::execute_draft;
pub use self::extract::execute_extract;
pub use self::serve::execute_serve;

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use contract_extractor::{read_document, Extractor};
use contract_llm::GeminiProvider;
use contract_review::Reviewer;

/// Build the extractor shared by `extract` and `analyze`.
pub fn build_extractor(config: &Config) -> Extractor<GeminiProvider> {
    Extractor::new(
        contract_server::gemini_from_env(),
        Reviewer::default(),
        config.extractor.clone(),
    )
}

/// Read contract text from `--input` or `--text`.
pub async fn read_source(source: &SourceArgs) -> Result<String> {
    match (&source.input, &source.text) {
        (Some(path), _) => Ok(read_document(path.clone()).await?),
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => Err(CliError::InvalidInput(
            "Provide --input or --text".to_string(),
        )),
    }
}

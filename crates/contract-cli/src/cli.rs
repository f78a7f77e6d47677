//! CLI command definitions and argument parsing.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Contract AI - Extract, analyze and draft contracts.
#[derive(Debug, Parser)]
#[command(name = "contract-ai")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CONTRACT_AI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Metadata, risk and compliance tables
    Table,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract metadata from contract text or a file
    Extract(SourceArgs),

    /// Analyze risks and compliance
    Analyze(AnalyzeArgs),

    /// Draft a contract from the clause library and template
    Draft(DraftArgs),

    /// Start the HTTP server
    Serve(ServeArgs),
}

impl Command {
    /// Log level used when `RUST_LOG` is unset.
    ///
    /// One-shot commands keep stderr quiet; `serve` reports its startup and
    /// LLM fallbacks like the standalone server binary does.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Command::Serve(_) => "info",
            _ => "warn",
        }
    }
}

/// Where the contract text comes from.
#[derive(Debug, Parser)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "text"])))]
pub struct SourceArgs {
    /// Path to a contract file (pdf, docx, txt)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Raw contract text
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Path to policies.yaml or policies.json
    #[arg(short, long)]
    pub policies: Option<PathBuf>,
}

/// Arguments for the draft command.
#[derive(Debug, Parser)]
pub struct DraftArgs {
    /// First party name
    #[arg(long)]
    pub party_a: String,

    /// Second party name
    #[arg(long)]
    pub party_b: String,

    /// Clause keys to include (all clauses when omitted)
    #[arg(long, num_args = 0..)]
    pub clauses: Option<Vec<String>>,

    /// Contract type, used to pick a template
    #[arg(long, default_value = "base")]
    pub contract_type: String,

    /// Extra template variable (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_variable)]
    pub variables: Vec<(String, String)>,
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    pub bind_address: String,

    /// Bind port
    #[arg(short, long, default_value = "8000")]
    pub port: u16,
}

fn parse_variable(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_requires_source() {
        assert!(Cli::try_parse_from(["contract-ai", "extract"]).is_err());
        assert!(Cli::try_parse_from(["contract-ai", "extract", "--text", "a", "--input", "b"]).is_err());
    }

    #[test]
    fn test_default_log_level() {
        let serve = Cli::parse_from(["contract-ai", "serve", "--port", "9000"]);
        assert_eq!(serve.command.default_log_level(), "info");

        let extract = Cli::parse_from(["contract-ai", "extract", "--text", "x"]);
        assert_eq!(extract.command.default_log_level(), "warn");

        let draft = Cli::parse_from(["contract-ai", "draft", "--party-a", "A", "--party-b", "B"]);
        assert_eq!(draft.command.default_log_level(), "warn");
    }

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "contract-ai",
            "--format",
            "table",
            "analyze",
            "--input",
            "nda.pdf",
            "--policies",
            "policies.json",
        ]);
        assert_eq!(cli.format, Some(CliFormat::Table));
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.source.input, Some(PathBuf::from("nda.pdf")));
                assert_eq!(args.policies, Some(PathBuf::from("policies.json")));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_draft_command() {
        let cli = Cli::parse_from([
            "contract-ai",
            "draft",
            "--party-a",
            "Acme",
            "--party-b",
            "Beta",
            "--clauses",
            "confidentiality",
            "governing_law",
            "--var",
            "effective_date=1 March 2025",
        ]);
        match cli.command {
            Command::Draft(args) => {
                assert_eq!(args.contract_type, "base");
                assert_eq!(
                    args.clauses,
                    Some(vec!["confidentiality".to_string(), "governing_law".to_string()])
                );
                assert_eq!(
                    args.variables,
                    vec![("effective_date".to_string(), "1 March 2025".to_string())]
                );
            }
            _ => panic!("Expected Draft command"),
        }
    }

    #[test]
    fn test_draft_requires_parties() {
        assert!(Cli::try_parse_from(["contract-ai", "draft", "--party-a", "Acme"]).is_err());
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(
            parse_variable("title=NDA=v2").unwrap(),
            ("title".to_string(), "NDA=v2".to_string())
        );
        assert!(parse_variable("no-separator").is_err());
        assert!(parse_variable("=value").is_err());
    }
}

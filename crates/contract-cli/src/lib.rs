//! Contract AI CLI library.
//!
//! Argument parsing, configuration, command execution and output formatting
//! for the `contract-ai` binary. `extract` and `analyze` run through the same
//! [`Extractor`](contract_extractor::Extractor) as the HTTP service.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

use tracing_subscriber::EnvFilter;

/// Install a stderr tracing subscriber so stdout stays machine-readable.
///
/// Honours `RUST_LOG`, falling back to `default_level`
/// (see [`Command::default_log_level`]).
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

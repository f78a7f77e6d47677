//! Contract AI CLI - extract, analyze and draft contracts from the command line.

use clap::Parser;
use contract_cli::commands;
use contract_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> contract_cli::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    contract_cli::init_tracing(cli.command.default_log_level());

    let config = Config::load(cli.config.as_deref())?;

    // Command-line flags win over the config file
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter).await?,
        Command::Draft(args) => commands::execute_draft(args, &config, &formatter)?,
        Command::Serve(args) => commands::execute_serve(args, &config).await?,
    }

    Ok(())
}

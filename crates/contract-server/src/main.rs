//! Contract AI server
//!
//! Starts the HTTP service for contract extraction, analysis and drafting.

use contract_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using defaults (127.0.0.1:8000, ./resources)");
        eprintln!("Usage: contract-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Contract AI server - contract extraction, analysis and drafting over HTTP");
    println!();
    println!("USAGE:");
    println!("    contract-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8000)");
    println!("    - resources_dir: Directory with policies.yaml, clauses.yaml, templates/");
    println!("    - llm_timeout_secs: Deadline for the LLM round trip (default: 90)");
    println!("    - max_upload_bytes: Request body limit (default: 20 MiB)");
    println!();
    println!("ENVIRONMENT:");
    println!("    GEMINI_API_KEY     Enables LLM-assisted extraction");
    println!("    GEMINI_MODEL       Overrides the Gemini model");
    println!("    LLM_LOG            Log prompts and responses to LLM_LOG_FILE (llm.log)");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}

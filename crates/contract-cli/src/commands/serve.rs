//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::error::Result;
use contract_server::config::ServerConfig;
use contract_server::ServerError;

/// Server configuration for the serve command.
pub fn server_config(args: &ServeArgs, config: &Config) -> std::result::Result<ServerConfig, ServerError> {
    let server = ServerConfig {
        bind_address: args.bind_address.clone(),
        bind_port: args.port,
        resources_dir: config.resources_dir.clone(),
        llm_timeout_secs: config.extractor.llm_timeout_secs,
        ..ServerConfig::default_config()
    };
    server.validate()?;
    Ok(server)
}

/// Execute the serve command.
pub async fn execute_serve(args: ServeArgs, config: &Config) -> Result<()> {
    let server = server_config(&args, config)?;
    contract_server::start_server(server).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_server_config_from_cli_config() {
        let mut config = Config::default();
        config.resources_dir = PathBuf::from("/srv/contract-ai");
        config.extractor.llm_timeout_secs = 20;

        let args = ServeArgs {
            bind_address: "0.0.0.0".to_string(),
            port: 9000,
        };
        let server = server_config(&args, &config).unwrap();

        assert_eq!(server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(server.policies_path(), PathBuf::from("/srv/contract-ai/policies.yaml"));
        assert_eq!(server.llm_timeout_secs, 20);
    }

    #[test]
    fn test_empty_bind_address_rejected() {
        let args = ServeArgs {
            bind_address: String::new(),
            port: 9000,
        };
        assert!(server_config(&args, &Config::default()).is_err());
    }
}

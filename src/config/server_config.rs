/// Configuration for the server, including the target network and the secrets it reads.
use std::env;

use crate::{
    constants::DEFAULT_RPC_TIMEOUT_MS,
    models::RelayNetwork,
};

use super::ConfigError;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Value of `NODE_ENV`.
    pub node_env: String,
    /// Network selected by `NODE_ENV`.
    pub network: RelayNetwork,
    /// Google Cloud project holding the secrets.
    pub gcp_project_id: String,
    /// Secret holding the relayer mnemonic.
    pub relayer_mnemonic_secret_id: String,
    /// Secret holding the Discord webhook URL.
    pub discord_webhook_url_secret_id: String,
    /// Overrides the network's public RPC endpoint.
    pub rpc_url: Option<String>,
    pub rpc_timeout_ms: u64,
    /// The host address the server will bind to.
    pub host: String,
    /// The port number the server will listen on.
    pub port: u16,
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(name.to_string())),
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    /// Creates a new `ServerConfig` instance from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `NODE_ENV`, `GCP_PROJECT_ID`,
    /// `RELAYER_MNEMONIC_SECRET_ID` or `DISCORD_WEBHOOK_URL_SECRET_ID` is unset,
    /// and [`ConfigError::InvalidValue`] for an unparsable port or timeout.
    ///
    /// # Defaults
    ///
    /// - `HOST` defaults to `"0.0.0.0"`.
    /// - `PORT`, then `APP_PORT`, defaults to `8080`.
    /// - `RPC_TIMEOUT_MS` defaults to `10000`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let node_env = required_var("NODE_ENV")?;
        let network = RelayNetwork::from_node_env(&node_env);

        let port = match env::var("PORT") {
            Ok(_) => parsed_var("PORT", 8080)?,
            Err(_) => parsed_var("APP_PORT", 8080)?,
        };

        Ok(Self {
            node_env,
            network,
            gcp_project_id: required_var("GCP_PROJECT_ID")?,
            relayer_mnemonic_secret_id: required_var("RELAYER_MNEMONIC_SECRET_ID")?,
            discord_webhook_url_secret_id: required_var("DISCORD_WEBHOOK_URL_SECRET_ID")?,
            rpc_url: env::var("RPC_URL").ok().filter(|url| !url.trim().is_empty()),
            rpc_timeout_ms: parsed_var("RPC_TIMEOUT_MS", DEFAULT_RPC_TIMEOUT_MS)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
        })
    }
}

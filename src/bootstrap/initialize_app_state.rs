//! Application state initialization
//!
//! Wires the chain client factory, the secret store, the Discord notifier and
//! the relayer cache into the relay engine shared by every request.
use crate::{
    config::ServerConfig,
    domain::RelayEngine,
    models::{AppState, DefaultAppState},
    services::{
        AlloyClientFactory, DiscordNotificationService, GcpSecretManagerService, RelayerCache,
    },
};
use actix_web::web;
use color_eyre::Result;
use log::info;
use std::sync::Arc;

/// Initializes application state
///
/// Nothing here talks to the network: clients and secrets are resolved on
/// the first relay that needs them.
pub fn initialize_app_state(config: &ServerConfig) -> Result<web::ThinData<DefaultAppState>> {
    info!(
        "Initializing relay engine for {} (chain id {})",
        config.network,
        config.network.chain_id()
    );

    let secret_service = Arc::new(GcpSecretManagerService::new(&config.gcp_project_id));
    let factory = AlloyClientFactory::new(
        config.network,
        config.rpc_url.clone(),
        config.rpc_timeout_ms,
    );
    let cache = Arc::new(RelayerCache::new(
        factory,
        secret_service.clone(),
        &config.relayer_mnemonic_secret_id,
    ));
    let notifier = Arc::new(DiscordNotificationService::new(
        secret_service,
        &config.discord_webhook_url_secret_id,
    ));

    let engine = RelayEngine::new(cache, notifier);

    Ok(web::ThinData(AppState::new(Arc::new(engine))))
}

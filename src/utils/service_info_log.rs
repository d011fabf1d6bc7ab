//! This module contains the function to log service information at startup.
use log::info;
use std::env;

use crate::models::RelayNetwork;

/// Logs service information at startup
pub fn log_service_info(network: RelayNetwork) {
    info!(
        "=== {} v{} starting ===",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "Network: {} (chain id {}, rpc {})",
        network,
        network.chain_id(),
        network.public_rpc_url()
    );
    info!("Platform: {}/{}", env::consts::OS, env::consts::ARCH);
    info!(
        "Started at: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
}

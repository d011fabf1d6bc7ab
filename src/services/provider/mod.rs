use std::time::Duration;

use crate::models::{ProviderError, RelayNetwork};

pub mod evm;
pub use evm::*;

/// Creates the provider for `network`.
///
/// `rpc_url` overrides the network's public endpoint when set.
pub fn get_network_provider(
    network: RelayNetwork,
    rpc_url: Option<&str>,
    timeout_ms: u64,
) -> Result<EvmProvider, ProviderError> {
    let url = rpc_url.unwrap_or_else(|| network.public_rpc_url());
    log::debug!("Creating {} provider for {}", network, url);
    EvmProvider::new(url, Duration::from_millis(timeout_ms))
}

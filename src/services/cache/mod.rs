//! Connection and cache layer shared by every relay in the process.
//!
//! ```text
//! RelayerCache
//!   ├── read client          (one, built on first use)
//!   ├── signing clients      (one per rate feed, derived from the mnemonic)
//!   └── contract existence   (address -> has code, never invalidated)
//! ```
//!
//! Concurrent first accesses may build the same client twice. The first
//! entry stored wins and is handed to every caller.

use std::sync::Arc;

use alloy::primitives::Address;
use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::OnceCell;

#[cfg(test)]
use mockall::automock;

use crate::{
    models::{ProviderError, RelayNetwork},
    services::{
        get_network_provider, EvmProvider, EvmProviderTrait, LocalSigner, RelaySigner,
        RelaySignerTrait, SecretError, SecretServiceTrait,
    },
    utils::{derive_relayer_account, DerivationError, RelayerIdentity},
};

#[cfg(test)]
use crate::services::{MockEvmProviderTrait, MockRelaySignerTrait};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to fetch relayer mnemonic: {0}")]
    Secret(#[from] SecretError),
    #[error("Failed to derive relayer account: {0}")]
    Derivation(#[from] DerivationError),
    #[error("Failed to create chain client: {0}")]
    Provider(#[from] ProviderError),
}

/// Builds the chain clients held by [`RelayerCache`].
#[cfg_attr(test, automock(type Provider = MockEvmProviderTrait; type Signer = MockRelaySignerTrait;))]
pub trait ClientFactoryTrait: Send + Sync {
    type Provider: EvmProviderTrait + 'static;
    type Signer: RelaySignerTrait + 'static;

    /// Network the clients talk to.
    fn network(&self) -> RelayNetwork;

    fn create_read_client(&self) -> Result<Self::Provider, ProviderError>;

    fn create_signing_client(
        &self,
        identity: RelayerIdentity,
        provider: Arc<Self::Provider>,
    ) -> Self::Signer;
}

/// Builds alloy HTTP clients for the configured network.
#[derive(Debug, Clone)]
pub struct AlloyClientFactory {
    network: RelayNetwork,
    rpc_url: Option<String>,
    timeout_ms: u64,
}

impl AlloyClientFactory {
    pub fn new(network: RelayNetwork, rpc_url: Option<String>, timeout_ms: u64) -> Self {
        Self {
            network,
            rpc_url,
            timeout_ms,
        }
    }
}

impl ClientFactoryTrait for AlloyClientFactory {
    type Provider = EvmProvider;
    type Signer = RelaySigner<EvmProvider>;

    fn network(&self) -> RelayNetwork {
        self.network
    }

    fn create_read_client(&self) -> Result<EvmProvider, ProviderError> {
        get_network_provider(self.network, self.rpc_url.as_deref(), self.timeout_ms)
    }

    fn create_signing_client(
        &self,
        identity: RelayerIdentity,
        provider: Arc<EvmProvider>,
    ) -> RelaySigner<EvmProvider> {
        RelaySigner::new(
            LocalSigner::new(identity.signer),
            provider,
            self.network.chain_id(),
        )
    }
}

pub struct RelayerCache<F, S>
where
    F: ClientFactoryTrait,
    S: SecretServiceTrait,
{
    factory: F,
    secret_service: Arc<S>,
    mnemonic_secret_id: String,
    read_client: OnceCell<Arc<F::Provider>>,
    signing_clients: DashMap<String, Arc<F::Signer>>,
    contract_cache: DashMap<Address, bool>,
}

impl<F, S> RelayerCache<F, S>
where
    F: ClientFactoryTrait,
    S: SecretServiceTrait,
{
    pub fn new(factory: F, secret_service: Arc<S>, mnemonic_secret_id: impl Into<String>) -> Self {
        Self {
            factory,
            secret_service,
            mnemonic_secret_id: mnemonic_secret_id.into(),
            read_client: OnceCell::new(),
            signing_clients: DashMap::new(),
            contract_cache: DashMap::new(),
        }
    }

    pub fn network(&self) -> RelayNetwork {
        self.factory.network()
    }

    /// Returns the shared read client, creating it on first use.
    pub async fn get_or_create_read_client(&self) -> Result<Arc<F::Provider>, CacheError> {
        let client = self
            .read_client
            .get_or_try_init(|| async {
                log::debug!("Creating read client for {}", self.factory.network());
                self.factory.create_read_client().map(Arc::new)
            })
            .await?;
        Ok(client.clone())
    }

    /// Returns the signing client of `rate_feed`, deriving its account on first use.
    pub async fn get_or_create_signing_client(
        &self,
        rate_feed: &str,
    ) -> Result<Arc<F::Signer>, CacheError> {
        if let Some(client) = self.signing_clients.get(rate_feed) {
            return Ok(client.clone());
        }

        let provider = self.get_or_create_read_client().await?;
        let mnemonic = self
            .secret_service
            .get_secret(&self.mnemonic_secret_id)
            .await?;
        let identity = derive_relayer_account(&mnemonic.to_str(), rate_feed)?;
        log::debug!("Derived signer {} for {}", identity.address, rate_feed);

        let client = Arc::new(self.factory.create_signing_client(identity, provider));
        let entry = self
            .signing_clients
            .entry(rate_feed.to_string())
            .or_insert(client);
        Ok(entry.value().clone())
    }

    /// Whether `address` holds contract code. Looked up once per address.
    pub async fn is_deployed_contract(&self, address: Address) -> Result<bool, CacheError> {
        if let Some(known) = self.contract_cache.get(&address) {
            return Ok(*known);
        }

        let provider = self.get_or_create_read_client().await?;
        let code = provider.get_code(address).await?;
        let is_contract = !code.is_empty();

        Ok(*self.contract_cache.entry(address).or_insert(is_contract))
    }

    /// Number of signing clients built so far.
    pub fn signing_client_count(&self) -> usize {
        self.signing_clients.len()
    }
}

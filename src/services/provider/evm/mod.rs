//! EVM provider used for every read and broadcast the relayer performs.
//!
//! Wraps an alloy HTTP provider with a request timeout. The relayer only
//! needs a handful of calls: code lookups for the contract existence cache,
//! `eth_call` simulation, fee and gas estimation, raw transaction broadcast
//! and receipt lookups.

use std::time::Duration;

use alloy::{
    primitives::{Address, Bytes, TxHash, U256},
    providers::{utils::Eip1559Estimation, Provider, ProviderBuilder, RootProvider},
    rpc::{client::ClientBuilder, types::TransactionRequest},
    transports::http::{Client, Http},
};
use async_trait::async_trait;
use reqwest::ClientBuilder as ReqwestClientBuilder;

#[cfg(test)]
use mockall::automock;

use crate::models::{ProviderError, RelayReceipt};

/// Provider for a single EVM JSON-RPC endpoint.
#[derive(Clone)]
pub struct EvmProvider {
    provider: RootProvider<Http<Client>>,
    rpc_url: String,
}

/// Chain operations needed by the relay engine and the operational tools.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait EvmProviderTrait: Send + Sync {
    /// Gets the deployed bytecode at `address`. Empty for externally owned accounts.
    async fn get_code(&self, address: Address) -> Result<Bytes, ProviderError>;

    /// Executes `tx` against the latest state without broadcasting it.
    async fn call_contract(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError>;

    /// Estimates the gas limit for `tx`.
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ProviderError>;

    /// Estimates EIP-1559 fee parameters from recent blocks.
    async fn estimate_eip1559_fees(&self) -> Result<Eip1559Estimation, ProviderError>;

    /// Gets the nonce of `address` at the latest block.
    async fn get_transaction_count(&self, address: Address) -> Result<u64, ProviderError>;

    /// Broadcasts an EIP-2718 encoded signed transaction.
    async fn send_raw_transaction(&self, tx: &[u8]) -> Result<TxHash, ProviderError>;

    /// Gets the receipt of `tx_hash`, or `None` while it is not mined.
    async fn get_relay_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<RelayReceipt>, ProviderError>;

    /// Gets the native balance of `address`, in wei.
    async fn get_balance(&self, address: Address) -> Result<U256, ProviderError>;
}

impl EvmProvider {
    /// Creates a provider for `url` whose requests time out after `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let rpc_url = url.parse().map_err(|e| {
            ProviderError::NetworkConfiguration(format!("Invalid URL format: {}", e))
        })?;

        let client = ReqwestClientBuilder::default()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let mut transport = Http::new(rpc_url);
        transport.set_client(client);

        let is_local = transport.guess_local();
        let client = ClientBuilder::default().transport(transport, is_local);

        Ok(Self {
            provider: ProviderBuilder::new().on_client(client),
            rpc_url: url.to_string(),
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl EvmProviderTrait for EvmProvider {
    async fn get_code(&self, address: Address) -> Result<Bytes, ProviderError> {
        log::debug!("eth_getCode {}", address);
        self.provider
            .get_code_at(address)
            .await
            .map_err(ProviderError::from)
    }

    async fn call_contract(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError> {
        self.provider.call(tx).await.map_err(ProviderError::from)
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ProviderError> {
        self.provider
            .estimate_gas(tx)
            .await
            .map_err(ProviderError::from)
    }

    async fn estimate_eip1559_fees(&self) -> Result<Eip1559Estimation, ProviderError> {
        self.provider
            .estimate_eip1559_fees(None)
            .await
            .map_err(ProviderError::from)
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64, ProviderError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(ProviderError::from)
    }

    async fn send_raw_transaction(&self, tx: &[u8]) -> Result<TxHash, ProviderError> {
        let pending_tx = self
            .provider
            .send_raw_transaction(tx)
            .await
            .map_err(ProviderError::from)?;

        Ok(*pending_tx.tx_hash())
    }

    async fn get_relay_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<RelayReceipt>, ProviderError> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(ProviderError::from)?;

        Ok(receipt.map(|receipt| RelayReceipt {
            transaction_hash: receipt.transaction_hash,
            succeeded: receipt.status(),
        }))
    }

    async fn get_balance(&self, address: Address) -> Result<U256, ProviderError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(ProviderError::from)
    }
}

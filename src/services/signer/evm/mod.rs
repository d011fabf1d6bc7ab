//! Signing client of a single relayer account.
//!
//! A [`RelaySigner`] pairs the derived key of one rate feed with the shared
//! chain provider. Transactions are built as EIP-1559, signed locally and
//! broadcast raw.
mod local_signer;
pub use local_signer::*;

use std::sync::Arc;

use alloy::{
    consensus::TxEip1559,
    primitives::{Address, Bytes, TxHash, TxKind, U256},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    domain::relay::{relay_calldata, relay_request},
    models::{FeeOverride, SignerError},
    services::EvmProviderTrait,
};

#[async_trait]
#[cfg_attr(test, automock)]
pub trait RelaySignerTrait: Send + Sync {
    /// Address of the signing account.
    fn address(&self) -> Address;

    /// Dry-runs `relay()` on `contract` from the signing account.
    async fn simulate_relay(&self, contract: Address) -> Result<(), SignerError>;

    /// Signs and broadcasts `relay()` on `contract`.
    ///
    /// Fees are estimated by the node unless `fees` is set.
    async fn send_relay(
        &self,
        contract: Address,
        fees: Option<FeeOverride>,
    ) -> Result<TxHash, SignerError>;

    /// Signs and broadcasts a plain value transfer.
    async fn send_value(&self, to: Address, amount: U256) -> Result<TxHash, SignerError>;
}

pub struct RelaySigner<P>
where
    P: EvmProviderTrait,
{
    signer: LocalSigner,
    provider: Arc<P>,
    chain_id: u64,
}

impl<P> RelaySigner<P>
where
    P: EvmProviderTrait,
{
    pub fn new(signer: LocalSigner, provider: Arc<P>, chain_id: u64) -> Self {
        Self {
            signer,
            provider,
            chain_id,
        }
    }

    async fn sign_and_send(
        &self,
        to: Address,
        value: U256,
        input: Bytes,
        fees: Option<FeeOverride>,
    ) -> Result<TxHash, SignerError> {
        let from = self.signer.address();
        let request = TransactionRequest {
            from: Some(from),
            to: Some(TxKind::Call(to)),
            value: Some(value),
            input: input.clone().into(),
            ..Default::default()
        };

        let nonce = self.provider.get_transaction_count(from).await?;
        let gas_limit = self.provider.estimate_gas(&request).await?;
        let fees = match fees {
            Some(fees) => fees,
            None => {
                let estimate = self.provider.estimate_eip1559_fees().await?;
                FeeOverride {
                    max_fee_per_gas: estimate.max_fee_per_gas,
                    max_priority_fee_per_gas: estimate.max_priority_fee_per_gas,
                }
            }
        };

        let unsigned_tx = TxEip1559 {
            chain_id: self.chain_id,
            nonce,
            gas_limit,
            max_fee_per_gas: fees.max_fee_per_gas,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
            to: TxKind::Call(to),
            value,
            input,
            ..Default::default()
        };

        let signed = self.signer.sign_transaction(unsigned_tx).await?;
        log::debug!(
            "Broadcasting tx {} from {} with nonce {}",
            signed.hash,
            from,
            nonce
        );

        let hash = self.provider.send_raw_transaction(&signed.raw).await?;
        Ok(hash)
    }
}

#[async_trait]
impl<P> RelaySignerTrait for RelaySigner<P>
where
    P: EvmProviderTrait,
{
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn simulate_relay(&self, contract: Address) -> Result<(), SignerError> {
        let request = relay_request(self.signer.address(), contract);
        self.provider.call_contract(&request).await?;
        Ok(())
    }

    async fn send_relay(
        &self,
        contract: Address,
        fees: Option<FeeOverride>,
    ) -> Result<TxHash, SignerError> {
        self.sign_and_send(contract, U256::ZERO, relay_calldata(), fees)
            .await
    }

    async fn send_value(&self, to: Address, amount: U256) -> Result<TxHash, SignerError> {
        self.sign_and_send(to, amount, Bytes::new(), None).await
    }
}

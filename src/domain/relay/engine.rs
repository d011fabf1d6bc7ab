//! Relay execution engine.
//!
//! Runs `relay()` on a rate feed's relayer contract:
//!
//! ```text
//! CheckContract -> Simulate -> Submit -> AwaitReceipt
//! ```
//!
//! Reverts and node errors are classified into a [`RelayOutcome`]. A
//! "replacement transaction underpriced" failure on the first attempt is
//! resubmitted once with raised fees; every other failure is terminal.

use std::{sync::Arc, time::Duration};

use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;
use log::{error, info, warn};

#[cfg(test)]
use mockall::automock;

use crate::{
    constants::{RECEIPT_POLL_INTERVAL, RECEIPT_TIMEOUT},
    models::{
        FeeOverride, ProviderError, RelayFailure, RelayOutcome, RelayRequest, SignerError,
        SkipReason,
    },
    services::{
        CacheError, ClientFactoryTrait, NotificationServiceTrait, RelaySignerTrait,
        RelayerCache, SecretServiceTrait,
    },
};

use super::{wait_for_receipt, NodeErrorKind, RevertReason};

#[async_trait]
#[cfg_attr(test, automock)]
pub trait RelayEngineTrait: Send + Sync {
    /// Relays the latest price of `rate_feed` through `target`.
    ///
    /// Returns `true` only when the relay transaction was mined successfully.
    async fn relay(&self, target: Address, rate_feed: &str) -> bool;
}

pub struct RelayEngine<F, S, N>
where
    F: ClientFactoryTrait,
    S: SecretServiceTrait,
    N: NotificationServiceTrait,
{
    cache: Arc<RelayerCache<F, S>>,
    notifier: Arc<N>,
    receipt_timeout: Duration,
    receipt_poll_interval: Duration,
}

impl<F, S, N> RelayEngine<F, S, N>
where
    F: ClientFactoryTrait,
    S: SecretServiceTrait,
    N: NotificationServiceTrait,
{
    pub fn new(cache: Arc<RelayerCache<F, S>>, notifier: Arc<N>) -> Self {
        Self {
            cache,
            notifier,
            receipt_timeout: RECEIPT_TIMEOUT,
            receipt_poll_interval: RECEIPT_POLL_INTERVAL,
        }
    }

    pub fn with_receipt_timing(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.receipt_timeout = timeout;
        self.receipt_poll_interval = poll_interval;
        self
    }

    /// Runs `request` to a terminal outcome, retrying a stuck submission once.
    pub async fn execute(&self, request: RelayRequest) -> RelayOutcome {
        let mut request = request;
        loop {
            match self.attempt(&request).await {
                RelayOutcome::RetryScheduled if !request.is_retry_attempt => {
                    request = request.into_retry();
                }
                outcome => return outcome,
            }
        }
    }

    async fn attempt(&self, request: &RelayRequest) -> RelayOutcome {
        let prefix = format!("[{}] [{}]", request.rate_feed, self.cache.network());
        info!("{} Relay request received for {}", prefix, request.target);

        match self.cache.is_deployed_contract(request.target).await {
            Ok(true) => {}
            Ok(false) => {
                error!(
                    "{} Relay failed. Relayer address {} is not a contract.",
                    prefix, request.target
                );
                return RelayOutcome::Failed(RelayFailure::NotAContract(request.target));
            }
            Err(e) => return self.setup_failure(&prefix, e),
        }

        let signer = match self.cache.get_or_create_signing_client(&request.rate_feed).await {
            Ok(signer) => signer,
            Err(e) => return self.setup_failure(&prefix, e),
        };

        if let Err(e) = signer.simulate_relay(request.target).await {
            return self.handle_error(&prefix, request, signer.address(), e).await;
        }

        let fees = request.is_retry_attempt.then(FeeOverride::retry);
        let tx_hash = match signer.send_relay(request.target, fees).await {
            Ok(tx_hash) => tx_hash,
            Err(e) => return self.handle_error(&prefix, request, signer.address(), e).await,
        };

        match self.await_receipt(tx_hash).await {
            Ok(true) => {
                info!("{} Relay succeeded: {}", prefix, tx_hash);
                RelayOutcome::Success(tx_hash)
            }
            Ok(false) => {
                error!("{} Relay tx failed: {}", prefix, tx_hash);
                RelayOutcome::Failed(RelayFailure::MinedButReverted(tx_hash))
            }
            Err(e) => {
                self.handle_error(&prefix, request, signer.address(), e.into())
                    .await
            }
        }
    }

    async fn await_receipt(&self, tx_hash: TxHash) -> Result<bool, ProviderError> {
        let provider = self.cache.get_or_create_read_client().await.map_err(|e| match e {
            CacheError::Provider(e) => e,
            other => ProviderError::Other(other.to_string()),
        })?;

        let receipt = wait_for_receipt(
            provider.as_ref(),
            tx_hash,
            self.receipt_timeout,
            self.receipt_poll_interval,
        )
        .await?;

        Ok(receipt.succeeded)
    }

    fn setup_failure(&self, prefix: &str, err: CacheError) -> RelayOutcome {
        error!("{} Relay failed. {}", prefix, err);
        let failure = match err {
            CacheError::Secret(e) => RelayFailure::SecretUnavailable(e.to_string()),
            CacheError::Derivation(e) => RelayFailure::DerivationFailure(e.to_string()),
            CacheError::Provider(e) => RelayFailure::NodeError(e.details()),
        };
        RelayOutcome::Failed(failure)
    }

    async fn handle_error(
        &self,
        prefix: &str,
        request: &RelayRequest,
        signer: Address,
        err: SignerError,
    ) -> RelayOutcome {
        match err.provider_error() {
            Some(ProviderError::Revert { message, data }) => {
                let reason = RevertReason::decode(data.as_ref(), message);
                self.handle_revert(prefix, request, reason, message).await
            }
            Some(provider_error) => {
                self.handle_node_error(prefix, request, signer, &provider_error.details())
                    .await
            }
            None => {
                self.handle_node_error(prefix, request, signer, &err.to_string())
                    .await
            }
        }
    }

    async fn handle_revert(
        &self,
        prefix: &str,
        request: &RelayRequest,
        reason: RevertReason,
        message: &str,
    ) -> RelayOutcome {
        match reason {
            RevertReason::TimestampNotNew => {
                info!(
                    "{} Relay skipped. Price from previous relay is still fresh in SortedOracles",
                    prefix
                );
                RelayOutcome::Skipped(SkipReason::TimestampNotNew)
            }
            RevertReason::ExpiredTimestamp => {
                warn!(
                    "{} Relay not possible. The current price is too old to be relayed",
                    prefix
                );
                RelayOutcome::Failed(RelayFailure::ExpiredTimestamp)
            }
            RevertReason::InvalidPrice => {
                error!("{} Relay failed. Source price is invalid", prefix);
                let details = format!("{}: {}", reason.name(), message);
                if let Err(e) = self
                    .notifier
                    .notify_invalid_price(&request.rate_feed, &details)
                    .await
                {
                    error!("{} Failed to send invalid price notification: {}", prefix, e);
                }
                RelayOutcome::Failed(RelayFailure::InvalidPrice)
            }
            RevertReason::Error(reason) => {
                error!("{} Relay failed. Contract reverted with: {}", prefix, reason);
                RelayOutcome::Failed(RelayFailure::Reverted(reason))
            }
            RevertReason::Unknown(diagnostic) => {
                error!("{} Relay failed. Unknown revert: {}", prefix, diagnostic);
                RelayOutcome::Failed(RelayFailure::UnknownRevert(diagnostic))
            }
        }
    }

    async fn handle_node_error(
        &self,
        prefix: &str,
        request: &RelayRequest,
        signer: Address,
        details: &str,
    ) -> RelayOutcome {
        match NodeErrorKind::classify(details) {
            NodeErrorKind::InsufficientFunds => {
                error!(
                    "{} Relay failed. Signer address {} doesn't have enough funds for the tx",
                    prefix, signer
                );
                RelayOutcome::Failed(RelayFailure::InsufficientFunds(signer))
            }
            NodeErrorKind::ReplacementUnderpriced if request.is_retry_attempt => {
                error!(
                    "{} Relay failed. Tx from signer {} remains stuck in the mempool after retrying. Will not retry again.",
                    prefix, signer
                );
                if let Err(e) = self
                    .notifier
                    .notify_stuck_transaction(&request.rate_feed, signer)
                    .await
                {
                    error!("{} Failed to send stuck tx notification: {}", prefix, e);
                }
                RelayOutcome::Failed(RelayFailure::StuckTransaction(signer))
            }
            NodeErrorKind::ReplacementUnderpriced => {
                info!(
                    "{} Relay failed. A tx from signer {} is stuck in the mempool, will retry once with a higher gas price",
                    prefix, signer
                );
                RelayOutcome::RetryScheduled
            }
            NodeErrorKind::Other => {
                error!(
                    "{} Relay failed with an unknown non-revert error: {}",
                    prefix, details
                );
                RelayOutcome::Failed(RelayFailure::NodeError(details.to_string()))
            }
        }
    }
}

#[async_trait]
impl<F, S, N> RelayEngineTrait for RelayEngine<F, S, N>
where
    F: ClientFactoryTrait,
    S: SecretServiceTrait,
    N: NotificationServiceTrait,
{
    async fn relay(&self, target: Address, rate_feed: &str) -> bool {
        self.execute(RelayRequest::new(rate_feed, target))
            .await
            .is_success()
    }
}

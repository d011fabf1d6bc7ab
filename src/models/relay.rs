use alloy::primitives::{Address, TxHash};
use thiserror::Error;

use crate::constants::{RETRY_BASE_GAS_FEE_WEI, RETRY_FEE_MULTIPLIER};

/// A single request to push the latest price of `rate_feed` through the
/// relayer contract at `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub rate_feed: String,
    pub target: Address,
    pub is_retry_attempt: bool,
}

impl RelayRequest {
    pub fn new(rate_feed: impl Into<String>, target: Address) -> Self {
        Self {
            rate_feed: rate_feed.into(),
            target,
            is_retry_attempt: false,
        }
    }

    /// Returns the same request flagged as the single retry attempt.
    pub fn into_retry(self) -> Self {
        Self {
            is_retry_attempt: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The previous relay is still within the freshness window.
    TimestampNotNew,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayFailure {
    #[error("Relayer address {0} is not a contract")]
    NotAContract(Address),
    #[error("Current price is too old to be relayed")]
    ExpiredTimestamp,
    #[error("Source price is invalid")]
    InvalidPrice,
    #[error("Contract reverted with: {0}")]
    Reverted(String),
    #[error("Unknown revert: {0}")]
    UnknownRevert(String),
    #[error("Signer {0} does not have enough funds for the tx")]
    InsufficientFunds(Address),
    #[error("Tx from signer {0} remains stuck in the mempool after retrying")]
    StuckTransaction(Address),
    #[error("Node error: {0}")]
    NodeError(String),
    #[error("Relay tx {0} was mined but reverted")]
    MinedButReverted(TxHash),
    #[error("Secret unavailable: {0}")]
    SecretUnavailable(String),
    #[error("Signer derivation failed: {0}")]
    DerivationFailure(String),
}

/// Result of one relay attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Success(TxHash),
    Skipped(SkipReason),
    Failed(RelayFailure),
    /// The attempt hit a stuck nonce and must be re-run once with raised fees.
    RetryScheduled,
}

impl RelayOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RelayOutcome::Success(_))
    }
}

/// Explicit EIP-1559 fee parameters, in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeOverride {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

impl FeeOverride {
    /// Fees used for the single resubmission of a stuck relay transaction.
    pub const fn retry() -> Self {
        let fee = RETRY_BASE_GAS_FEE_WEI * RETRY_FEE_MULTIPLIER;
        Self {
            max_fee_per_gas: fee,
            max_priority_fee_per_gas: fee,
        }
    }
}

/// The parts of a mined transaction receipt the relayer looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    pub transaction_hash: TxHash,
    pub succeeded: bool,
}

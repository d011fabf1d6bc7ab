//! Classification of relay failures.
//!
//! Contract reverts are decoded into [`RevertReason`]. Every other node or
//! transport failure is bucketed into a [`NodeErrorKind`] from the message
//! the node returned.

use alloy::{
    primitives::Bytes,
    sol_types::{Revert, SolError, SolInterface},
};

use super::contract::IPriceFeedRelayer::IPriceFeedRelayerErrors;

/// Decoded reason of a reverted relay call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    /// The previous relay is still fresh.
    TimestampNotNew,
    /// The source price is too old to relay.
    ExpiredTimestamp,
    /// The source price is not positive.
    InvalidPrice,
    /// `Error(string)` revert from a `require` statement.
    Error(String),
    /// Anything the relayer interface does not declare.
    Unknown(String),
}

impl RevertReason {
    /// Decodes revert `data`, falling back to the node's `message` when the
    /// node did not return any.
    pub fn decode(data: Option<&Bytes>, message: &str) -> Self {
        match data {
            Some(data) if !data.is_empty() => Self::from_revert_data(data, message),
            _ => Self::from_message(message),
        }
    }

    fn from_revert_data(data: &Bytes, message: &str) -> Self {
        if let Ok(error) = IPriceFeedRelayerErrors::abi_decode(data, true) {
            return match error {
                IPriceFeedRelayerErrors::TimestampNotNew(_) => RevertReason::TimestampNotNew,
                IPriceFeedRelayerErrors::ExpiredTimestamp(_) => RevertReason::ExpiredTimestamp,
                IPriceFeedRelayerErrors::InvalidPrice(_)
                | IPriceFeedRelayerErrors::NegativePrice(_) => RevertReason::InvalidPrice,
            };
        }

        if let Ok(revert) = Revert::abi_decode(data, true) {
            return RevertReason::Error(revert.reason);
        }

        RevertReason::Unknown(format!("{} (data: {})", message, data))
    }

    fn from_message(message: &str) -> Self {
        match message
            .split_once("execution reverted:")
            .map(|(_, reason)| reason.trim())
        {
            Some(reason) if !reason.is_empty() => RevertReason::Error(reason.to_string()),
            _ => RevertReason::Unknown(message.to_string()),
        }
    }

    /// Name of the revert as declared on-chain.
    pub fn name(&self) -> &str {
        match self {
            RevertReason::TimestampNotNew => "TimestampNotNew",
            RevertReason::ExpiredTimestamp => "ExpiredTimestamp",
            RevertReason::InvalidPrice => "InvalidPrice",
            RevertReason::Error(_) => "Error",
            RevertReason::Unknown(_) => "Unknown",
        }
    }
}

/// Node level failure class of a relay submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeErrorKind {
    /// The signer cannot pay for gas.
    InsufficientFunds,
    /// A pending transaction already occupies the nonce.
    ReplacementUnderpriced,
    Other,
}

impl NodeErrorKind {
    pub fn classify(details: &str) -> Self {
        let details = details.to_lowercase();
        if details.contains("insufficient funds") {
            NodeErrorKind::InsufficientFunds
        } else if details.contains("replacement transaction underpriced") {
            NodeErrorKind::ReplacementUnderpriced
        } else {
            NodeErrorKind::Other
        }
    }
}

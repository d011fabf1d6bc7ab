//! This module contains all the constant values used in the system
mod relayer;
pub use relayer::*;

mod evm_transaction;
pub use evm_transaction::*;

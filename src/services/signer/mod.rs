//! Signing clients for relayer accounts.
//!
//! ```text
//! RelaySignerTrait
//!   └── RelaySigner (EVM, EIP-1559)
//!         └── LocalSigner (derived key in memory)
//! ```
mod evm;
pub use evm::*;

//! # Domain Module
//!
//! Core relay logic: pushing the latest oracle price of a rate feed on-chain
//! through its relayer contract and classifying what went wrong when it fails.

pub mod relay;
pub use relay::*;

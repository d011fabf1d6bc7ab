//! Deterministic derivation of relayer signing accounts.
//!
//! Every rate feed signs with its own account, derived from a single master
//! mnemonic. The account index is taken from the SHA-256 digest of the rate
//! feed name so the same feed always maps to the same address without any
//! state being persisted.

use std::fmt;

use alloy::{
    primitives::Address,
    signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::constants::MAX_NON_HARDENED_INDEX;

#[derive(Debug, Error)]
pub enum DerivationError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),
}

/// Signing identity of a single rate feed.
#[derive(Clone)]
pub struct RelayerIdentity {
    pub rate_feed: String,
    pub address: Address,
    pub signer: PrivateKeySigner,
}

impl fmt::Debug for RelayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayerIdentity")
            .field("rate_feed", &self.rate_feed)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Computes the account index used for `rate_feed`.
///
/// The first four bytes of the SHA-256 digest are read as a big-endian
/// integer and reduced into the BIP-32 child index range `[0, 2^31)`.
pub fn derivation_index(rate_feed: &str) -> u32 {
    let digest = Sha256::digest(rate_feed.as_bytes());
    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    prefix % MAX_NON_HARDENED_INDEX
}

/// Returns the derivation path for an account index.
pub fn derivation_path(index: u32) -> String {
    format!("m/44'/60'/{}'/0/0", index)
}

/// Derives the signer at `index` from `mnemonic`.
pub fn derive_signer_at_index(
    mnemonic: &str,
    index: u32,
) -> Result<PrivateKeySigner, DerivationError> {
    MnemonicBuilder::<English>::default()
        .phrase(mnemonic.trim())
        .derivation_path(derivation_path(index))
        .map_err(|e| DerivationError::InvalidPath(e.to_string()))?
        .build()
        .map_err(|e| DerivationError::InvalidMnemonic(e.to_string()))
}

/// Derives the relayer signing identity for `rate_feed`.
pub fn derive_relayer_account(
    mnemonic: &str,
    rate_feed: &str,
) -> Result<RelayerIdentity, DerivationError> {
    let signer = derive_signer_at_index(mnemonic, derivation_index(rate_feed))?;

    Ok(RelayerIdentity {
        rate_feed: rate_feed.to_string(),
        address: signer.address(),
        signer,
    })
}

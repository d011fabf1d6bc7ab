use thiserror::Error;

use super::ProviderError;

#[derive(Error, Debug, Clone, PartialEq)]
#[allow(clippy::enum_variant_names)]
pub enum SignerError {
    #[error("Failed to sign transaction: {0}")]
    SigningError(String),

    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),
}

impl SignerError {
    /// Returns the underlying RPC failure, if the node rejected the call.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            SignerError::ProviderError(e) => Some(e),
            _ => None,
        }
    }
}

use alloy::{
    consensus::{SignableTransaction, TxEip1559, TxEnvelope},
    eips::eip2718::Encodable2718,
    network::TxSigner,
    primitives::{Address, TxHash},
    signers::local::PrivateKeySigner,
};

use crate::models::SignerError;

/// A signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone)]
pub struct SignedRawTransaction {
    pub hash: TxHash,
    pub raw: Vec<u8>,
}

/// Signs transactions with a key held in process memory.
#[derive(Clone)]
pub struct LocalSigner {
    local_signer_client: PrivateKeySigner,
}

impl LocalSigner {
    pub fn new(local_signer_client: PrivateKeySigner) -> Self {
        Self {
            local_signer_client,
        }
    }

    pub fn address(&self) -> Address {
        self.local_signer_client.address()
    }

    pub async fn sign_transaction(
        &self,
        mut unsigned_tx: TxEip1559,
    ) -> Result<SignedRawTransaction, SignerError> {
        let signature = self
            .local_signer_client
            .sign_transaction(&mut unsigned_tx)
            .await
            .map_err(|e| SignerError::SigningError(e.to_string()))?;

        let envelope = TxEnvelope::Eip1559(unsigned_tx.into_signed(signature));

        Ok(SignedRawTransaction {
            hash: *envelope.tx_hash(),
            raw: envelope.encoded_2718(),
        })
    }
}

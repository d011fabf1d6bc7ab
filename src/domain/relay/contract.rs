//! Bindings for the price feed relayer contract.
use alloy::{
    primitives::{Address, Bytes, TxKind},
    rpc::types::{TransactionInput, TransactionRequest},
    sol_types::SolCall,
};

alloy::sol! {
    #[sol(all_derives)]
    interface IPriceFeedRelayer {
        error TimestampNotNew();
        error ExpiredTimestamp();
        error InvalidPrice();
        /// Earlier deployments report a non-positive source price with this error.
        error NegativePrice();

        function relay() external;
    }
}

/// Calldata of the zero-argument `relay()` call.
pub fn relay_calldata() -> Bytes {
    Bytes::from(IPriceFeedRelayer::relayCall {}.abi_encode())
}

/// Builds a `relay()` call on `contract` sent by `from`.
pub fn relay_request(from: Address, contract: Address) -> TransactionRequest {
    TransactionRequest {
        from: Some(from),
        to: Some(TxKind::Call(contract)),
        input: TransactionInput::new(relay_calldata()),
        ..Default::default()
    }
}

use std::time::Duration;

use alloy::primitives::TxHash;

use crate::{
    models::{ProviderError, RelayReceipt},
    services::EvmProviderTrait,
};

/// Polls for the receipt of `tx_hash` until it is mined.
///
/// Fails with [`ProviderError::Timeout`] once `timeout` elapses.
pub async fn wait_for_receipt<P>(
    provider: &P,
    tx_hash: TxHash,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<RelayReceipt, ProviderError>
where
    P: EvmProviderTrait + ?Sized,
{
    let poll = async {
        loop {
            if let Some(receipt) = provider.get_relay_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            tokio::time::sleep(poll_interval).await;
        }
    };

    tokio::time::timeout(timeout, poll)
        .await
        .map_err(|_| ProviderError::Timeout)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockEvmProviderTrait;
    use alloy::primitives::b256;
    use futures::FutureExt;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    const HASH: TxHash = b256!("3333333333333333333333333333333333333333333333333333333333333333");

    fn mined(succeeded: bool) -> RelayReceipt {
        RelayReceipt {
            transaction_hash: HASH,
            succeeded,
        }
    }

    #[tokio::test]
    async fn test_returns_receipt_once_mined() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut provider = MockEvmProviderTrait::new();
        provider.expect_get_relay_receipt().returning(move |_| {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok((call >= 2).then(|| mined(true))) }.boxed()
        });

        let receipt = wait_for_receipt(
            &provider,
            HASH,
            Duration::from_secs(5),
            Duration::from_millis(1),
        )
        .await
        .unwrap();

        assert!(receipt.succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_reverted_receipt_is_returned() {
        let mut provider = MockEvmProviderTrait::new();
        provider
            .expect_get_relay_receipt()
            .times(1)
            .returning(|_| async { Ok(Some(mined(false))) }.boxed());

        let receipt = wait_for_receipt(
            &provider,
            HASH,
            Duration::from_secs(5),
            Duration::from_millis(1),
        )
        .await
        .unwrap();
        assert!(!receipt.succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_never_mined() {
        let mut provider = MockEvmProviderTrait::new();
        provider
            .expect_get_relay_receipt()
            .returning(|_| async { Ok(None) }.boxed());

        let result = wait_for_receipt(
            &provider,
            HASH,
            Duration::from_secs(50),
            Duration::from_secs(2),
        )
        .await;
        assert_eq!(result, Err(ProviderError::Timeout));
    }

    #[tokio::test]
    async fn test_rpc_error_stops_polling() {
        let mut provider = MockEvmProviderTrait::new();
        provider
            .expect_get_relay_receipt()
            .times(1)
            .returning(|_| async { Err(ProviderError::Transport("reset".to_string())) }.boxed());

        let result = wait_for_receipt(
            &provider,
            HASH,
            Duration::from_secs(5),
            Duration::from_millis(1),
        )
        .await;
        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }
}

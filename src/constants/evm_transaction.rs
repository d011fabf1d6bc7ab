use std::time::Duration;

/// Baseline fee used when resubmitting a stuck relay transaction (25 gwei).
pub const RETRY_BASE_GAS_FEE_WEI: u128 = 25_000_000_000;

/// Multiplier applied to the baseline fee on the single retry attempt.
pub const RETRY_FEE_MULTIPLIER: u128 = 2;

/// Maximum time to wait for a relay transaction to be mined.
/// Sized for 10 L1 or 50 L2 blocks.
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(50);

/// Interval between receipt polls while waiting for confirmation.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default timeout for individual JSON-RPC requests.
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 10_000;

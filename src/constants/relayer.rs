//! Relayer account constants.

/// Upper bound (exclusive) of BIP-32 non-hardened child indices.
pub const MAX_NON_HARDENED_INDEX: u32 = 1 << 31;

/// Balance below which the refill tool tops up a relayer signer, in CELO.
pub const REFILL_MIN_BALANCE_CELO: u64 = 5;
/// Amount transferred to a relayer signer per top-up, in CELO.
pub const REFILL_TRANSFER_AMOUNT_CELO: u64 = 50;

/// Wei per CELO (18 decimals).
pub const WEI_PER_CELO: u128 = 1_000_000_000_000_000_000;

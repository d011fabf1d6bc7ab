//! Rate feed identifiers and name conversions.

use alloy::primitives::{keccak256, Address};

/// Prefix of the on-chain label of relayed rate feeds.
pub const RELAYED_LABEL_PREFIX: &str = "relayed:";

/// Computes the on-chain rate feed id for a label.
///
/// Mirrors `address(uint160(uint256(keccak256(abi.encodePacked(label)))))`:
/// the low 160 bits of the keccak-256 hash of the raw label bytes. The
/// result prints as an EIP-55 checksummed address.
pub fn to_rate_feed_id(label: &str) -> Address {
    let hash = keccak256(label.as_bytes());
    Address::from_slice(&hash[12..])
}

/// Converts a relayer address file key (e.g. `celo_php`) into the rate feed
/// name used for signer derivation (e.g. `CELO/PHP`).
///
/// Only the first `_` separates base and quote; later ones are kept.
pub fn rate_feed_key_to_name(key: &str) -> String {
    key.replacen('_', "/", 1).to_uppercase()
}

/// Converts a relayer address file key (e.g. `celo_php`) into its on-chain
/// label suffix (e.g. `CELOPHP`).
pub fn rate_feed_key_to_label(key: &str) -> String {
    key.replacen('_', "", 1).to_uppercase()
}

/// Returns the full on-chain label (`relayed:CELOPHP`) for a label suffix.
pub fn relayed_label(label: &str) -> String {
    format!("{}{}", RELAYED_LABEL_PREFIX, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rate_feed_id_known_values() {
        assert_eq!(
            to_rate_feed_id("relayed:CELOPHP").to_checksum(None),
            "0xaFc02368A174Cd08e01c373de6D0B537CECF43C8"
        );
        assert_eq!(
            to_rate_feed_id("relayed:PHPUSD").to_checksum(None),
            "0xab921d6ab1057601A9ae19879b111fC381a2a8E9"
        );
    }

    #[test]
    fn test_to_rate_feed_id_is_case_sensitive() {
        assert_ne!(
            to_rate_feed_id("relayed:CELOPHP"),
            to_rate_feed_id("relayed:celophp")
        );
    }

    #[test]
    fn test_to_rate_feed_id_display_is_checksummed() {
        let id = to_rate_feed_id("relayed:PHPUSD");
        assert_eq!(id.to_string(), "0xab921d6ab1057601A9ae19879b111fC381a2a8E9");
    }

    #[test]
    fn test_to_rate_feed_id_matches_low_bits_of_hash() {
        let label = "relayed:CELOEUR";
        let hash = keccak256(label.as_bytes());
        assert_eq!(to_rate_feed_id(label).as_slice(), &hash[12..]);
    }

    #[test]
    fn test_rate_feed_key_conversions() {
        assert_eq!(rate_feed_key_to_name("celo_php"), "CELO/PHP");
        assert_eq!(rate_feed_key_to_name("php_usd"), "PHP/USD");
        assert_eq!(rate_feed_key_to_label("celo_php"), "CELOPHP");
        assert_eq!(relayed_label("CELOPHP"), "relayed:CELOPHP");
    }

    #[test]
    fn test_rate_feed_key_splits_on_first_separator_only() {
        assert_eq!(rate_feed_key_to_name("a_b_c"), "A/B_C");
        assert_eq!(rate_feed_key_to_label("a_b_c"), "AB_C");
        assert_eq!(rate_feed_key_to_name("celo_eth_v2"), "CELO/ETH_V2");
    }

    #[test]
    fn test_rate_feed_key_without_separator() {
        assert_eq!(rate_feed_key_to_name("eurocusd"), "EUROCUSD");
        assert_eq!(rate_feed_key_to_label("eurocusd"), "EUROCUSD");
    }
}

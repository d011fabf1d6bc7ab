//! Property-based tests for rate feed identifiers and key conversions.
//!
//!   Refer to `src/utils/rate_feed.rs` for more details.
use alloy::primitives::keccak256;
use oracle_relayer::utils::{
    rate_feed_key_to_label, rate_feed_key_to_name, relayed_label, to_rate_feed_id,
};
use proptest::{prelude::*, test_runner::Config};

proptest! {
  #![proptest_config(Config {
    cases: 1000, ..Config::default()
  })]

  /// The id is the low 160 bits of the label hash
  #[test]
  fn prop_rate_feed_id_is_masked_hash(label in ".*") {
      let id = to_rate_feed_id(&label);
      let hash = keccak256(label.as_bytes());
      prop_assert_eq!(id.as_slice(), &hash[12..]);
  }

  /// Name and label of the same key differ only by the separator
  #[test]
  fn prop_key_conversions_agree(base in "[a-z]{3,4}", quote in "[a-z]{3,4}") {
      let key = format!("{}_{}", base, quote);
      let name = rate_feed_key_to_name(&key);
      let label = rate_feed_key_to_label(&key);
      prop_assert_eq!(name.replace('/', ""), label.clone());
      prop_assert_eq!(name, format!("{}/{}", base.to_uppercase(), quote.to_uppercase()));
      prop_assert!(relayed_label(&label).starts_with("relayed:"));
  }
}

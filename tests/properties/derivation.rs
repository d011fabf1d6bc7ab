//! Property-based tests for relayer account derivation.
//!
//!   Refer to `src/utils/derivation.rs` for more details.
use oracle_relayer::utils::{derivation_index, derivation_path, derive_relayer_account};
use proptest::{prelude::*, test_runner::Config};
use sha2::{Digest, Sha256};

const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

proptest! {
  #![proptest_config(Config {
    cases: 1000, ..Config::default()
  })]

  /// Indices stay in the non-hardened child range
  #[test]
  fn prop_derivation_index_in_range(rate_feed in ".*") {
      prop_assert!(derivation_index(&rate_feed) < (1u32 << 31));
  }

  /// The index is the digest prefix with the top bit cleared
  #[test]
  fn prop_derivation_index_matches_digest_prefix(rate_feed in ".*") {
      let digest = Sha256::digest(rate_feed.as_bytes());
      let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
      prop_assert_eq!(derivation_index(&rate_feed), prefix & 0x7fff_ffff);
  }

  /// The account index occupies the account level of the path
  #[test]
  fn prop_derivation_path_shape(index in 0u32..(1u32 << 31)) {
      prop_assert_eq!(derivation_path(index), format!("m/44'/60'/{}'/0/0", index));
  }
}

proptest! {
  // mnemonic seed stretching is slow
  #![proptest_config(Config {
    cases: 16, ..Config::default()
  })]

  #[test]
  fn prop_derive_relayer_account_is_deterministic(
    base in "[A-Z]{3,4}",
    quote in "[A-Z]{3,4}"
  ) {
      let rate_feed = format!("{}/{}", base, quote);
      let first = derive_relayer_account(TEST_MNEMONIC, &rate_feed).unwrap();
      let second = derive_relayer_account(TEST_MNEMONIC, &rate_feed).unwrap();
      prop_assert_eq!(first.address, second.address);
      prop_assert_eq!(first.signer.address(), first.address);
      prop_assert_eq!(first.rate_feed, rate_feed);
  }
}

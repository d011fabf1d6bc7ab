//! Property-based tests for logging.
//!
//! These tests verify the behavior of the `compute_rolled_file_path` function
//! and the log level parsing used by `setup_logging`.
//!
//!   Refer to `src/logging/mod.rs` for more details.
use oracle_relayer::logging::{compute_rolled_file_path, parse_level_filter};
use proptest::{prelude::*, test_runner::Config};
use simplelog::LevelFilter;

proptest! {
  #![proptest_config(Config {
    cases: 1000, ..Config::default()
  })]

  /// A ".log" suffix is replaced by the date and index
  #[test]
  fn prop_compute_rolled_file_path_with_log_suffix(
    base in ".*[^.]",
    date in "[0-9]{4}-[0-9]{2}-[0-9]{2}",
    index in 1u32..1000
  ) {
      let base_with_log = format!("{}.log", base);
      let result = compute_rolled_file_path(&base_with_log, &date, index);
      prop_assert_eq!(result, format!("{}-{}.{}.log", base, date, index));
  }

  /// Any other base is kept whole
  #[test]
  fn prop_compute_rolled_file_path_without_log_suffix(
    base in ".*",
    date in "[0-9]{4}-[0-9]{2}-[0-9]{2}"
  ) {
      let base_non_log = if base.ends_with(".log") {
        format!("{}x", base)
      } else {
        base
      };
      let result = compute_rolled_file_path(&base_non_log, &date, 1);
      prop_assert_eq!(result, format!("{}-{}.1.log", base_non_log, date));
  }

  /// Unknown level names fall back to info
  #[test]
  fn prop_unknown_level_is_info(level in "[a-z]{0,12}") {
      prop_assume!(!["trace", "debug", "info", "warn", "error"].contains(&level.as_str()));
      prop_assert_eq!(parse_level_filter(&level), LevelFilter::Info);
  }
}

//! Integration tests for file logging.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_DATA_DIR: when using file mode, the directory of the log files (default "./logs")
//!   Refer to `src/logging/mod.rs` for more details.
use chrono::Utc;
use oracle_relayer::logging::{compute_rolled_file_path, resolve_log_file_path, setup_logging};
use std::{env, fs, path::Path, sync::Mutex, thread, time::Duration};
use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

// A logger can be installed once per process, so only this test calls setup_logging.
#[test]
fn test_setup_logging_file_mode_creates_log_file() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = temp_dir.path().join("nested").join("logs");
    let log_dir = log_dir.to_str().unwrap();

    env::remove_var("LOG_MAX_SIZE");
    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_DATA_DIR", format!("{}/", log_dir));

    setup_logging();
    log::info!("[CELO/PHP] [celo-alfajores] Relay request received");

    thread::sleep(Duration::from_millis(200));

    let expected_path = compute_rolled_file_path(
        &format!("{}/relayer.log", log_dir),
        &today(),
        1,
    );
    assert!(
        Path::new(&expected_path).exists(),
        "Expected log file {} does not exist",
        expected_path
    );
    let contents = fs::read_to_string(&expected_path).unwrap();
    assert!(contents.contains("[CELO/PHP] [celo-alfajores] Relay request received"));

    for name in ["LOG_MODE", "LOG_LEVEL", "LOG_DATA_DIR"] {
        env::remove_var(name);
    }
}

#[test]
fn test_log_file_rolls_when_existing_is_full() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = temp_dir.path().to_str().unwrap();
    let date_str = today();

    let first = resolve_log_file_path(log_dir, &date_str, 10);
    fs::write(&first, "Existing log file larger than ten bytes").unwrap();

    let rolled = resolve_log_file_path(log_dir, &date_str, 10);
    assert_ne!(rolled, first);
    assert_eq!(
        rolled,
        compute_rolled_file_path(&format!("{}/relayer.log", log_dir), &date_str, 2)
    );
}

#[test]
fn test_log_file_is_reused_when_under_max_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = temp_dir.path().to_str().unwrap();
    let date_str = today();

    let first = resolve_log_file_path(log_dir, &date_str, 10_000);
    fs::write(&first, "small file").unwrap();

    assert_eq!(resolve_log_file_path(log_dir, &date_str, 10_000), first);
}

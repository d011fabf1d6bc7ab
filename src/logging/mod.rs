//! ## Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_DATA_DIR: when using file mode, the directory of the log files (default "./logs")
//! - LOG_MAX_SIZE: when using file mode, the size in bytes after which a new file is started
//!   (default 1 GiB)

use chrono::Utc;
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, SimpleLogger, WriteLogger};
use std::{
    env,
    fs::{create_dir_all, metadata, OpenOptions},
    path::Path,
};

const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_MAX_LOG_SIZE: u64 = 1_073_741_824;
const LOG_FILE_NAME: &str = "relayer.log";

/// Where log records are written.
#[derive(Debug, Clone, PartialEq)]
pub enum LogMode {
    Stdout,
    File { dir: String, max_size: u64 },
}

/// Logging settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub mode: LogMode,
}

impl LoggingConfig {
    /// Reads `LOG_MODE`, `LOG_LEVEL`, `LOG_DATA_DIR` and `LOG_MAX_SIZE`.
    ///
    /// # Panics
    ///
    /// Panics if `LOG_MAX_SIZE` is set but is not a valid `u64`.
    pub fn from_env() -> Self {
        let level = parse_level_filter(&env::var("LOG_LEVEL").unwrap_or_default());

        let mode = match env::var("LOG_MODE") {
            Ok(mode) if mode.eq_ignore_ascii_case("file") => {
                let dir = env::var("LOG_DATA_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
                let max_size = env::var("LOG_MAX_SIZE")
                    .map(|s| {
                        s.parse::<u64>()
                            .expect("LOG_MAX_SIZE must be a valid u64 if set")
                    })
                    .unwrap_or(DEFAULT_MAX_LOG_SIZE);
                LogMode::File { dir, max_size }
            }
            _ => LogMode::Stdout,
        };

        Self { level, mode }
    }
}

/// Parses a log level name, falling back to `Info` for anything unknown.
pub fn parse_level_filter(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Computes the path of the rolled log file given the base file path and the date string.
pub fn compute_rolled_file_path(base_file_path: &str, date_str: &str, index: u32) -> String {
    let stem = base_file_path
        .strip_suffix(".log")
        .unwrap_or(base_file_path);
    format!("{}-{}.{}.log", stem, date_str, index)
}

/// Returns the first rolled file of `date_str` that is not larger than `max_size`.
pub fn space_based_rolling(base_file_path: &str, date_str: &str, max_size: u64) -> String {
    let mut index = 1;
    loop {
        let path = compute_rolled_file_path(base_file_path, date_str, index);
        match metadata(&path) {
            Ok(existing) if existing.len() > max_size => index += 1,
            _ => return path,
        }
    }
}

/// Resolves the file today's records go to inside `dir`.
pub fn resolve_log_file_path(dir: &str, date_str: &str, max_size: u64) -> String {
    let base_file_path = format!("{}/{}", dir.trim_end_matches('/'), LOG_FILE_NAME);
    space_based_rolling(&base_file_path, date_str, max_size)
}

/// Sets up logging by reading configuration from environment variables.
pub fn setup_logging() {
    let config = LoggingConfig::from_env();
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    match &config.mode {
        LogMode::File { dir, max_size } => {
            let date_str = Utc::now().format("%Y-%m-%d").to_string();
            let final_path = resolve_log_file_path(dir, &date_str, *max_size);

            if let Some(parent) = Path::new(&final_path).parent() {
                create_dir_all(parent).expect("Failed to create log directory");
            }

            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&final_path)
                .unwrap_or_else(|e| panic!("Unable to open log file {}: {}", final_path, e));
            WriteLogger::init(config.level, log_config, log_file)
                .expect("Failed to initialize file logger");
            info!("Logging to file {} at level {}", final_path, config.level);
        }
        LogMode::Stdout => {
            SimpleLogger::init(config.level, log_config)
                .expect("Failed to initialize simple logger");
            info!("Logging to stdout at level {}", config.level);
        }
    }
}

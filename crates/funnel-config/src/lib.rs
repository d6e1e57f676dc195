mod auth_config;
mod board_config;
mod client_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod retry_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use board_config::BoardConfig;
pub use client_config::ClientConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use retry_config::RetryConfig;

const CONFIG_DIR_ENV: &str = "FUNNEL_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".funnel";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

const DEFAULT_COLUMN: &str = "ideacao";
const DEFAULT_ERROR_DISPLAY_MS: u64 = 3000;
const MIN_ERROR_DISPLAY_MS: u64 = 100;
const MAX_ERROR_DISPLAY_MS: u64 = 60_000;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 0;
const MIN_POLL_INTERVAL_SECS: u64 = 1;
const MAX_POLL_INTERVAL_SECS: u64 = 3600;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

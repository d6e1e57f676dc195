use crate::{
    AuthConfig, BoardConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ClientConfig, ConfigError,
    ConfigErrorResult, DEFAULT_CONFIG_DIR, LoggingConfig, RetryConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub client: ClientConfig,
    pub auth: AuthConfig,
    pub board: BoardConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Loading order:
    /// 1. FUNNEL_CONFIG_DIR env var, else ./.funnel/
    /// 2. config.toml in that directory if it exists, else defaults
    /// 3. FUNNEL_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse a TOML file with the path in any error.
    pub fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: FUNNEL_CONFIG_DIR env var > ./.funnel/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all sections. Call after load().
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.client.validate()?;
        self.board.validate()?;
        self.retry.validate()?;
        Ok(())
    }

    /// Log configuration summary (NEVER logs the token).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  client: {} (timeout {}s)",
            self.client.base_url, self.client.timeout_secs
        );
        info!(
            "  auth: token={}, company={}, role={}",
            if self.auth.token.is_some() {
                "set"
            } else {
                "none"
            },
            self.auth.company_id.as_deref().unwrap_or("none"),
            self.auth.role.as_deref().unwrap_or("none")
        );
        info!(
            "  board: default_column={}, error_display={}ms, poll={}",
            self.board.default_column,
            self.board.error_display_ms,
            match self.board.poll_interval_secs {
                0 => String::from("off"),
                secs => format!("{secs}s"),
            }
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Client
        Self::apply_env_string("FUNNEL_BASE_URL", &mut self.client.base_url);
        Self::apply_env_parse("FUNNEL_TIMEOUT_SECS", &mut self.client.timeout_secs);

        // Auth
        Self::apply_env_option_string("FUNNEL_TOKEN", &mut self.auth.token);
        Self::apply_env_option_string("FUNNEL_COMPANY_ID", &mut self.auth.company_id);
        Self::apply_env_option_string("FUNNEL_ROLE", &mut self.auth.role);

        // Board
        Self::apply_env_string("FUNNEL_DEFAULT_COLUMN", &mut self.board.default_column);
        Self::apply_env_parse("FUNNEL_ERROR_DISPLAY_MS", &mut self.board.error_display_ms);
        Self::apply_env_parse(
            "FUNNEL_POLL_INTERVAL_SECS",
            &mut self.board.poll_interval_secs,
        );

        // Retry
        Self::apply_env_parse("FUNNEL_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "FUNNEL_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse(
            "FUNNEL_RETRY_MAX_DELAY_SECS",
            &mut self.retry.max_delay_secs,
        );
        Self::apply_env_parse(
            "FUNNEL_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("FUNNEL_RETRY_JITTER", &mut self.retry.jitter);

        // Logging
        Self::apply_env_parse("FUNNEL_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("FUNNEL_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("FUNNEL_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_COLUMN, DEFAULT_ERROR_DISPLAY_MS,
    DEFAULT_POLL_INTERVAL_SECS, MAX_ERROR_DISPLAY_MS, MAX_POLL_INTERVAL_SECS,
    MIN_ERROR_DISPLAY_MS, MIN_POLL_INTERVAL_SECS,
};

use std::time::Duration;

use funnel_core::Stage;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Column that receives items whose stage the board does not recognise
    pub default_column: String,
    /// How long a sync or mutation failure stays visible, in milliseconds
    pub error_display_ms: u64,
    /// Background reload interval in seconds (0 = disabled)
    pub poll_interval_secs: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_column: String::from(DEFAULT_COLUMN),
            error_display_ms: DEFAULT_ERROR_DISPLAY_MS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !Stage::is_column_key(&self.default_column) {
            return Err(ConfigError::board(format!(
                "board.default_column must be one of [{}], got '{}'",
                Stage::ALL.map(|stage| stage.column_key()).join(", "),
                self.default_column
            )));
        }

        if self.error_display_ms < MIN_ERROR_DISPLAY_MS
            || self.error_display_ms > MAX_ERROR_DISPLAY_MS
        {
            return Err(ConfigError::board(format!(
                "board.error_display_ms must be {}-{}, got {}",
                MIN_ERROR_DISPLAY_MS, MAX_ERROR_DISPLAY_MS, self.error_display_ms
            )));
        }

        // 0 disables polling
        if self.poll_interval_secs != 0
            && (self.poll_interval_secs < MIN_POLL_INTERVAL_SECS
                || self.poll_interval_secs > MAX_POLL_INTERVAL_SECS)
        {
            return Err(ConfigError::board(format!(
                "board.poll_interval_secs must be 0 (disabled) or {}-{}, got {}",
                MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS, self.poll_interval_secs
            )));
        }

        Ok(())
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }

    /// `None` when polling is disabled
    pub fn poll_interval(&self) -> Option<Duration> {
        (self.poll_interval_secs > 0).then(|| Duration::from_secs(self.poll_interval_secs))
    }
}

use crate::{BoardError, BoardResult};

use std::time::Duration;

use funnel_config::BoardConfig;
use funnel_core::Stage;

const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardOptions {
    /// Column key for items whose stage is not in the stage table
    pub default_column: String,
    /// Stage sent when a create request names none
    pub creation_stage: Stage,
    /// How long a transient error stays in the view
    pub error_display: Duration,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            default_column: Stage::INITIAL.column_key().to_string(),
            creation_stage: Stage::INITIAL,
            error_display: DEFAULT_ERROR_DISPLAY,
        }
    }
}

impl BoardOptions {
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            default_column: config.default_column.clone(),
            creation_stage: Stage::INITIAL,
            error_display: config.error_display(),
        }
    }

    /// Stage behind `default_column`
    pub fn default_stage(&self) -> BoardResult<Stage> {
        Stage::from_column_key(&self.default_column).map_err(|_| {
            BoardError::invalid_options(format!(
                "default column '{}' is not a board column",
                self.default_column
            ))
        })
    }

    pub fn validate(&self) -> BoardResult<()> {
        self.default_stage()?;

        if self.error_display.is_zero() {
            return Err(BoardError::invalid_options(
                "error display duration must be greater than zero",
            ));
        }

        Ok(())
    }
}

use std::panic::Location;

use error_location::ErrorLocation;
use funnel_board::BoardError;
use funnel_client::ClientError;
use funnel_config::ConfigError;
use funnel_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("{source}")]
    Client {
        #[from]
        source: ClientError,
    },

    #[error("{source}")]
    Board {
        #[from]
        source: BoardError,
    },

    #[error("Invalid argument: {source}")]
    Argument {
        #[from]
        source: CoreError,
    },

    #[error("Error serializing output: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn logger<S: Into<String>>(message: S) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

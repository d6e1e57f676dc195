use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use funnel_client::ClientError;
use funnel_core::Stage;
use thiserror::Error;

/// Which non-move mutation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Load failed: {message} {location}")]
    Load {
        message: String,
        location: ErrorLocation,
    },

    #[error("Move rejected: '{column}' is not a board column {location}")]
    MoveRejected {
        column: String,
        location: ErrorLocation,
    },

    #[error("Unknown challenge: {id} {location}")]
    UnknownItem { id: String, location: ErrorLocation },

    #[error("Failed to move {id} to {stage}: {source} {location}")]
    Sync {
        id: String,
        stage: Stage,
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Failed to {operation} challenge {target}: {source} {location}")]
    Mutation {
        operation: MutationKind,
        target: String,
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Invalid board options: {message} {location}")]
    InvalidOptions {
        message: String,
        location: ErrorLocation,
    },
}

impl BoardError {
    #[track_caller]
    pub fn load<S: Into<String>>(message: S) -> Self {
        Self::Load {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn move_rejected<S: Into<String>>(column: S) -> Self {
        Self::MoveRejected {
            column: column.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unknown_item<S: Into<String>>(id: S) -> Self {
        Self::UnknownItem {
            id: id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn sync<S: Into<String>>(id: S, stage: Stage, source: ClientError) -> Self {
        Self::Sync {
            id: id.into(),
            stage,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn mutation<S: Into<String>>(
        operation: MutationKind,
        target: S,
        source: ClientError,
    ) -> Self {
        Self::Mutation {
            operation,
            target: target.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_options<S: Into<String>>(message: S) -> Self {
        Self::InvalidOptions {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether this failure belongs in the published view.
    ///
    /// Rejections of malformed requests are caller bugs and only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Load { .. } | Self::Sync { .. } | Self::Mutation { .. }
        )
    }

    /// Short message for display, without source chains or locations
    pub fn user_message(&self) -> String {
        match self {
            Self::Load { .. } => String::from("Could not load challenges. Try again."),
            Self::Sync { id, stage, .. } => format!(
                "Could not move challenge {} to {}. The change was undone.",
                id,
                stage.column_key()
            ),
            Self::Mutation {
                operation, target, ..
            } => format!("Could not {} challenge {}.", operation, target),
            Self::MoveRejected { column, .. } => format!("'{}' is not a board column.", column),
            Self::UnknownItem { id, .. } => format!("Challenge {} is not on the board.", id),
            Self::InvalidOptions { message, .. } => message.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;

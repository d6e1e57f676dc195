use crate::{CoreError, CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Funnel phase a challenge is in.
///
/// Declaration order is pipeline order and must match [`STAGE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Ideation,
    PreScreening,
    IdeaGeneration,
    DetailedScreening,
    Experimentation,
}

/// Stage, board column key, backend wire value.
///
/// The only place column keys and wire values are spelled out.
pub const STAGE_TABLE: [(Stage, &str, &str); 5] = [
    (Stage::Ideation, "ideacao", "IDEATION"),
    (Stage::PreScreening, "pretriagem", "PRE_SCREENING"),
    (Stage::IdeaGeneration, "colaboracao", "IDEA_GENERATION"),
    (Stage::DetailedScreening, "avaliacao", "DETAILED_SCREENING"),
    (Stage::Experimentation, "experimentacao", "EXPERIMENTATION"),
];

impl Stage {
    /// Every stage, in pipeline order.
    pub const ALL: [Stage; 5] = [
        Stage::Ideation,
        Stage::PreScreening,
        Stage::IdeaGeneration,
        Stage::DetailedScreening,
        Stage::Experimentation,
    ];

    /// Stage new challenges are created in.
    pub const INITIAL: Stage = Stage::Ideation;

    /// Zero-based position in the pipeline
    pub fn position(&self) -> usize {
        *self as usize
    }

    /// Backend wire value (e.g. `PRE_SCREENING`)
    pub fn as_str(&self) -> &'static str {
        STAGE_TABLE[self.position()].2
    }

    /// Board column key (e.g. `pretriagem`)
    pub fn column_key(&self) -> &'static str {
        STAGE_TABLE[self.position()].1
    }

    /// Resolve a board column key to its stage.
    #[track_caller]
    pub fn from_column_key(key: &str) -> CoreErrorResult<Self> {
        STAGE_TABLE
            .iter()
            .find(|(_, column, _)| *column == key)
            .map(|(stage, _, _)| *stage)
            .ok_or_else(|| CoreError::InvalidColumn {
                value: key.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// True if `key` names a board column.
    pub fn is_column_key(key: &str) -> bool {
        STAGE_TABLE.iter().any(|(_, column, _)| *column == key)
    }
}

impl FromStr for Stage {
    type Err = CoreError;

    /// Parse a backend wire value. Matching is exact.
    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        STAGE_TABLE
            .iter()
            .find(|(_, _, wire)| *wire == s)
            .map(|(stage, _, _)| *stage)
            .ok_or_else(|| CoreError::InvalidStage {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

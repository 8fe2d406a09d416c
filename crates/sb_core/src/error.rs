use thiserror::Error;

use crate::models::player::FieldPosition;

/// Configuration and API errors.
///
/// Ordinary game outcomes (walks, strikeouts, balls in play) are never errors.
/// These variants cover invariant violations in the inputs only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("team '{team}' has no player assigned to {position}")]
    MissingPosition { team: String, position: FieldPosition },

    #[error("team '{team}' has more than one player assigned to {position}")]
    DuplicatePosition { team: String, position: FieldPosition },

    #[error("team '{team}' cannot play itself")]
    SelfMatchup { team: String },

    #[error("team '{team}' lineup size invalid: expected {expected}, found {found}")]
    InvalidLineupSize { team: String, expected: usize, found: usize },

    #[error("invalid stats for {player}: {reason}")]
    InvalidStats { player: String, reason: String },

    #[error("unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("config error: {0}")]
    Config(String),
}

impl SimError {
    /// Errors caused by the roster or matchup rather than by malformed input.
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            SimError::MissingPosition { .. }
                | SimError::DuplicatePosition { .. }
                | SimError::SelfMatchup { .. }
                | SimError::InvalidLineupSize { .. }
                | SimError::InvalidStats { .. }
        )
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SimError::Deserialization(err.to_string())
        } else {
            SimError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

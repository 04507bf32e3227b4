//! Error codes for the Tally backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Tally backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Fewer than two participants were selected
    TooFewParticipants,
    /// The same player appears twice in the participant list
    DuplicateParticipant,
    /// The chosen dealer is not in the participant list
    DealerNotParticipant,
    /// A submitted score could not be parsed as an integer
    InvalidScore,
    /// A round submission contained no scores
    EmptyRound,
    /// Generic validation failure
    ValidationError,

    // Conflicts
    /// The nick is already in use by another player
    NickTaken,
    /// The game is already finished and accepts no further rounds
    GameAlreadyFinished,

    // Missing resources
    /// Player not found
    PlayerNotFound,
    /// Game not found
    GameNotFound,
    /// Generic not-found
    NotFound,

    // Infrastructure
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE representation used in HTTP responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::TooFewParticipants => "TOO_FEW_PARTICIPANTS",
            ErrorCode::DuplicateParticipant => "DUPLICATE_PARTICIPANT",
            ErrorCode::DealerNotParticipant => "DEALER_NOT_PARTICIPANT",
            ErrorCode::InvalidScore => "INVALID_SCORE",
            ErrorCode::EmptyRound => "EMPTY_ROUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NickTaken => "NICK_TAKEN",
            ErrorCode::GameAlreadyFinished => "GAME_ALREADY_FINISHED",
            ErrorCode::PlayerNotFound => "PLAYER_NOT_FOUND",
            ErrorCode::GameNotFound => "GAME_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_screaming_snake_case() {
        let codes = [
            ErrorCode::TooFewParticipants,
            ErrorCode::NickTaken,
            ErrorCode::GameAlreadyFinished,
            ErrorCode::PlayerNotFound,
            ErrorCode::DbUnavailable,
        ];
        for code in codes {
            let s = code.as_str();
            assert!(!s.is_empty());
            assert!(s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }
}

//! Error types for schedule generation and score submission

use thiserror::Error;

/// Invalid tournament setup. Fatal to the current generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("minimum 4 players required")]
    TooFewPlayers,
    #[error("player count must be a multiple of 4")]
    PlayersNotMultipleOfFour,
    #[error("at least 1 court required")]
    NoCourts,
    #[error("too many courts for player count")]
    TooManyCourts,
    #[error("at most {max} players are supported by the pairing search")]
    TooManyPlayers { max: usize },
    #[error("player names must not be empty")]
    EmptyPlayerName,
    #[error("duplicate player name: {0}")]
    DuplicatePlayer(String),
    #[error("points per match must be at least 1")]
    InvalidPointsPerMatch,
    #[error("round policy must schedule at least 1 round for {players} players")]
    ZeroRounds { players: usize },
    #[error("invalid configuration file: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigurationError {
    fn from(err: toml::de::Error) -> Self {
        ConfigurationError::Parse(err.to_string())
    }
}

/// A submitted score that breaks a numeric rule. Recoverable by resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("team {team} score {score} is outside 0..={max}")]
    ScoreOutOfRange { team: u8, score: i64, max: u32 },
    #[error("team {team} score {score} is negative")]
    NegativeScore { team: u8, score: i64 },
    #[error("scores must add up to {expected}, got {total}")]
    WrongTotal { total: i64, expected: u32 },
    #[error("set {set} cannot end in a tie")]
    TiedSet { set: usize },
    #[error("team {team} declared {declared} but won {won} sets")]
    SetCountMismatch { team: u8, declared: i64, won: u32 },
    #[error("set scores are required in set-points mode")]
    MissingSets,
    #[error("game {0} already has a score")]
    AlreadyScored(u32),
    #[error("no match with game number {0}")]
    UnknownGame(u32),
}

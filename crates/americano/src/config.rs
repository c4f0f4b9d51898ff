//! Tournament configuration and the checks that gate schedule generation

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigurationError;
use crate::ledger::MAX_PLAYERS;
use crate::score::{ScoreRules, ScoringMode, DEFAULT_FIXED_POINT_TOTAL};
use crate::Player;

/// Check player and court counts. Rules are applied in order and the first
/// failure is returned.
pub fn validate_tournament_config(players_count: usize, courts_count: usize) -> Result<(), ConfigurationError> {
    if players_count < 4 {
        return Err(ConfigurationError::TooFewPlayers);
    }
    if players_count % 4 != 0 {
        return Err(ConfigurationError::PlayersNotMultipleOfFour);
    }
    if courts_count < 1 {
        return Err(ConfigurationError::NoCourts);
    }
    if courts_count > players_count / 4 {
        return Err(ConfigurationError::TooManyCourts);
    }
    Ok(())
}

/// Check the roster itself: size ceiling, then non-empty names that are
/// unique ignoring case.
pub fn validate_players(players: &[Player]) -> Result<(), ConfigurationError> {
    if players.len() > MAX_PLAYERS {
        return Err(ConfigurationError::TooManyPlayers { max: MAX_PLAYERS });
    }

    let mut seen = HashSet::with_capacity(players.len());
    for name in players {
        if name.trim().is_empty() {
            return Err(ConfigurationError::EmptyPlayerName);
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(ConfigurationError::DuplicatePlayer(name.clone()));
        }
    }
    Ok(())
}

/// Round count used for player counts missing from the override table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundFallback {
    /// ceil(players / 4) rounds
    #[default]
    QuarterOfPlayers,
    /// players - 1 rounds, enough for everyone to partner everyone once
    PartnerEveryone,
}

/// One row of the round-count table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCountEntry {
    pub players: usize,
    pub rounds: usize,
}

/// How many rounds to schedule for a given number of players.
///
/// The default table (4→1, 8→3, 12→4, 16→5) trades schedule length against
/// partner variety. It is a tunable policy, so every entry can be replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundCountPolicy {
    pub overrides: Vec<RoundCountEntry>,
    pub fallback: RoundFallback,
}

impl Default for RoundCountPolicy {
    fn default() -> Self {
        Self {
            overrides: [(4, 1), (8, 3), (12, 4), (16, 5)]
                .into_iter()
                .map(|(players, rounds)| RoundCountEntry { players, rounds })
                .collect(),
            fallback: RoundFallback::QuarterOfPlayers,
        }
    }
}

impl RoundCountPolicy {
    /// No table, N - 1 rounds for every roster size.
    pub fn full_rotation() -> Self {
        Self {
            overrides: Vec::new(),
            fallback: RoundFallback::PartnerEveryone,
        }
    }

    /// Replace (or add) the round count for one roster size.
    pub fn with_override(mut self, players: usize, rounds: usize) -> Self {
        match self.overrides.iter_mut().find(|e| e.players == players) {
            Some(entry) => entry.rounds = rounds,
            None => self.overrides.push(RoundCountEntry { players, rounds }),
        }
        self
    }

    pub fn rounds_for(&self, players: usize) -> usize {
        self.overrides
            .iter()
            .find(|e| e.players == players)
            .map(|e| e.rounds)
            .unwrap_or(match self.fallback {
                RoundFallback::QuarterOfPlayers => players.div_ceil(4),
                RoundFallback::PartnerEveryone => players.saturating_sub(1),
            })
    }
}

fn default_name() -> String {
    "Americano".to_string()
}

fn default_points_per_match() -> u32 {
    DEFAULT_FIXED_POINT_TOTAL
}

/// Everything needed to generate and score one event.
///
/// ```toml
/// name = "Friday Americano"
/// players = ["Ana", "Ben", "Cleo", "Dev"]
/// courts = 1
/// points_per_match = 16
/// scoring = "raw-points"
///
/// [round_policy]
/// fallback = "quarter-of-players"
/// overrides = [{ players = 4, rounds = 3 }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub players: Vec<Player>,
    pub courts: usize,
    #[serde(default = "default_points_per_match")]
    pub points_per_match: u32,
    #[serde(default)]
    pub scoring: ScoringMode,
    #[serde(default)]
    pub round_policy: RoundCountPolicy,
}

impl TournamentConfig {
    pub fn new(players: Vec<Player>, courts: usize) -> Self {
        Self {
            name: default_name(),
            players,
            courts,
            points_per_match: DEFAULT_FIXED_POINT_TOTAL,
            scoring: ScoringMode::default(),
            round_policy: RoundCountPolicy::default(),
        }
    }

    /// Parse a configuration from TOML text. Does not validate it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply every pre-generation check, first failure wins.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_tournament_config(self.players.len(), self.courts)?;
        validate_players(&self.players)?;
        if self.points_per_match < 1 {
            return Err(ConfigurationError::InvalidPointsPerMatch);
        }
        if self.round_policy.rounds_for(self.players.len()) == 0 {
            return Err(ConfigurationError::ZeroRounds {
                players: self.players.len(),
            });
        }
        Ok(())
    }

    /// Score rules implied by this configuration
    pub fn score_rules(&self) -> ScoreRules {
        ScoreRules::new(self.scoring, self.points_per_match)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

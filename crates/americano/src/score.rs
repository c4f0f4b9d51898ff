//! Match scores, scoring modes and score validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Default fixed point total for a match (the two team scores must sum to this)
pub const DEFAULT_FIXED_POINT_TOTAL: u32 = 16;

/// One side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Team1,
    Team2,
}

/// Score of a single set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub team1: u32,
    pub team2: u32,
}

impl SetScore {
    pub fn new(team1: u32, team2: u32) -> Self {
        Self { team1, team2 }
    }

    /// Winner of the set, `None` for a tie
    pub fn winner(&self) -> Option<Side> {
        winner_of(self.team1, self.team2)
    }
}

/// Final score of a match, optionally with per-set detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub team1_score: u32,
    pub team2_score: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sets: Vec<SetScore>,
}

impl MatchScore {
    pub fn new(team1_score: u32, team2_score: u32) -> Self {
        Self {
            team1_score,
            team2_score,
            sets: Vec::new(),
        }
    }

    /// Build a set-format score whose match score is the number of sets each team won.
    pub fn from_sets(sets: Vec<SetScore>) -> Self {
        let (team1_score, team2_score) = sets_won(&sets);
        Self {
            team1_score,
            team2_score,
            sets,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        winner_of(self.team1_score, self.team2_score)
    }

    pub fn has_sets(&self) -> bool {
        !self.sets.is_empty()
    }

    /// Sets won by (team1, team2). Tied sets count for neither.
    pub fn sets_won(&self) -> (u32, u32) {
        sets_won(&self.sets)
    }
}

fn winner_of(team1: u32, team2: u32) -> Option<Side> {
    match team1.cmp(&team2) {
        std::cmp::Ordering::Greater => Some(Side::Team1),
        std::cmp::Ordering::Less => Some(Side::Team2),
        std::cmp::Ordering::Equal => None,
    }
}

fn sets_won(sets: &[SetScore]) -> (u32, u32) {
    sets.iter()
        .fold((0, 0), |(won1, won2), set| match set.winner() {
            Some(Side::Team1) => (won1 + 1, won2),
            Some(Side::Team2) => (won1, won2 + 1),
            None => (won1, won2),
        })
}

/// How completed matches turn into leaderboard points.
///
/// The two modes give different rankings for the same data, so callers pick
/// one explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// Total points = sum of the player's team scores
    #[default]
    RawPoints,
    /// Total points = 3 per match won + 1 per set won
    SetPoints,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::RawPoints => write!(f, "raw-points"),
            ScoringMode::SetPoints => write!(f, "set-points"),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw-points" | "raw" | "points" => Ok(ScoringMode::RawPoints),
            "set-points" | "sets" => Ok(ScoringMode::SetPoints),
            other => Err(format!("unknown scoring mode: {other}")),
        }
    }
}

/// Outcome of validating a submitted score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreValidation {
    pub is_valid: bool,
    pub total_points: i64,
    pub errors: Vec<ValidationError>,
}

impl ScoreValidation {
    fn from_errors(total_points: i64, errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            total_points,
            errors,
        }
    }

    /// First error, if any.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn check_range(team: u8, score: i64, max: u32, errors: &mut Vec<ValidationError>) {
    if score < 0 || score > i64::from(max) {
        errors.push(ValidationError::ScoreOutOfRange { team, score, max });
    }
}

/// Validate a fixed-total score: both scores within `0..=fixed_point_total`
/// and summing to exactly `fixed_point_total`.
///
/// Scores are signed so that negative submissions are reported rather than
/// rejected at the type level.
pub fn validate_match_score(team1_score: i64, team2_score: i64, fixed_point_total: u32) -> ScoreValidation {
    let mut errors = Vec::new();
    check_range(1, team1_score, fixed_point_total, &mut errors);
    check_range(2, team2_score, fixed_point_total, &mut errors);

    // Saturates so extreme submissions are reported as a wrong total
    let total = team1_score.saturating_add(team2_score);
    if total != i64::from(fixed_point_total) {
        errors.push(ValidationError::WrongTotal {
            total,
            expected: fixed_point_total,
        });
    }

    ScoreValidation::from_errors(total, errors)
}

/// Richer validation for scores that may carry set detail.
///
/// With `fixed_point_total` the range and sum rules of [`validate_match_score`]
/// apply; without it only negative scores are rejected. When sets are given,
/// no set may be tied and each team's declared score must equal the number of
/// sets it won.
pub fn validate_match_score_detailed(
    team1_score: i64,
    team2_score: i64,
    sets: &[SetScore],
    fixed_point_total: Option<u32>,
) -> ScoreValidation {
    let mut errors = match fixed_point_total {
        Some(total) => validate_match_score(team1_score, team2_score, total).errors,
        None => {
            let mut errors = Vec::new();
            for (team, score) in [(1u8, team1_score), (2u8, team2_score)] {
                if score < 0 {
                    errors.push(ValidationError::NegativeScore { team, score });
                }
            }
            errors
        }
    };

    if !sets.is_empty() {
        for (i, set) in sets.iter().enumerate() {
            if set.winner().is_none() {
                errors.push(ValidationError::TiedSet { set: i + 1 });
            }
        }

        let (won1, won2) = sets_won(sets);
        for (team, declared, won) in [(1u8, team1_score, won1), (2u8, team2_score, won2)] {
            if declared != i64::from(won) {
                errors.push(ValidationError::SetCountMismatch {
                    team,
                    declared,
                    won,
                });
            }
        }
    }

    ScoreValidation::from_errors(team1_score.saturating_add(team2_score), errors)
}

/// Per-tournament rules a submitted score is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRules {
    pub mode: ScoringMode,
    pub fixed_point_total: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            mode: ScoringMode::RawPoints,
            fixed_point_total: DEFAULT_FIXED_POINT_TOTAL,
        }
    }
}

impl ScoreRules {
    pub fn new(mode: ScoringMode, fixed_point_total: u32) -> Self {
        Self {
            mode,
            fixed_point_total,
        }
    }

    /// Check a score under these rules.
    ///
    /// In raw-points mode the fixed total applies to the match score. In
    /// set-points mode the match score counts sets, so set detail is required
    /// and the fixed total is not applied.
    ///
    /// Set detail in raw-points mode is still checked against the match score,
    /// so each team's points must equal the sets it won. With a fixed total of
    /// 16 that rejects any ordinary set breakdown; record raw-points matches
    /// without sets.
    pub fn validate(&self, score: &MatchScore) -> ScoreValidation {
        let team1 = i64::from(score.team1_score);
        let team2 = i64::from(score.team2_score);
        match self.mode {
            ScoringMode::RawPoints => {
                validate_match_score_detailed(team1, team2, &score.sets, Some(self.fixed_point_total))
            }
            ScoringMode::SetPoints if score.sets.is_empty() => {
                ScoreValidation::from_errors(team1 + team2, vec![ValidationError::MissingSets])
            }
            ScoringMode::SetPoints => validate_match_score_detailed(team1, team2, &score.sets, None),
        }
    }
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod score_tests;

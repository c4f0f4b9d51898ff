//! Schedule generation: rounds, matches and the rotation between rounds

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{validate_players, validate_tournament_config, RoundCountPolicy};
use crate::error::{ConfigurationError, ValidationError};
use crate::ledger::{DiversityLedger, PlayerId};
use crate::pairing::select_best_match;
use crate::score::{MatchScore, ScoreRules};
use crate::Player;

/// Two players sharing a side of the court. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team(pub [Player; 2]);

impl Team {
    pub fn new(a: impl Into<Player>, b: impl Into<Player>) -> Self {
        Team([a.into(), b.into()])
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.0
    }

    pub fn contains(&self, player: &str) -> bool {
        self.0.iter().any(|p| p == player)
    }

    /// Order-independent key, smaller name first
    pub fn key(&self) -> (Player, Player) {
        let [a, b] = &self.0;
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single doubles match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub court: u32,
    pub team1: Team,
    pub team2: Team,
    pub round: u32,
    pub game_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<MatchScore>,
    #[serde(default)]
    pub status: MatchStatus,
}

impl Match {
    pub fn new(round: u32, court: u32, game_number: u32, team1: Team, team2: Team) -> Self {
        Self {
            court,
            team1,
            team2,
            round,
            game_number,
            score: None,
            status: MatchStatus::Pending,
        }
    }

    /// All four players, team1 first
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team1.0.iter().chain(self.team2.0.iter())
    }

    /// The score, if this match is completed
    pub fn completed_score(&self) -> Option<&MatchScore> {
        match self.status {
            MatchStatus::Completed => self.score.as_ref(),
            MatchStatus::Pending => None,
        }
    }

    /// Attach a score. A match is scored at most once, and a rejected score
    /// leaves the match untouched.
    pub fn record_score(&mut self, score: MatchScore, rules: &ScoreRules) -> Result<(), ValidationError> {
        if self.status == MatchStatus::Completed {
            return Err(ValidationError::AlreadyScored(self.game_number));
        }
        rules.validate(&score).into_result()?;
        self.score = Some(score);
        self.status = MatchStatus::Completed;
        Ok(())
    }
}

/// Matches played concurrently, one per filled court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub round: u32,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.matches.iter().flat_map(Match::players)
    }
}

/// Score the match with `game_number` somewhere in `rounds`.
pub fn record_match_score(
    rounds: &mut [Round],
    game_number: u32,
    score: MatchScore,
    rules: &ScoreRules,
) -> Result<(), ValidationError> {
    let found = rounds
        .iter_mut()
        .flat_map(|r| r.matches.iter_mut())
        .find(|m| m.game_number == game_number);
    match found {
        Some(m) => m.record_score(score, rules),
        None => Err(ValidationError::UnknownGame(game_number)),
    }
}

/// Fills the courts of a single round from the current player ordering.
pub struct RoundBuilder<'a> {
    roster: &'a [Player],
    courts: u32,
}

impl<'a> RoundBuilder<'a> {
    /// `roster[i]` is the name of `PlayerId(i)`.
    pub fn new(roster: &'a [Player], courts: u32) -> Self {
        Self { roster, courts }
    }

    fn team(&self, ids: [PlayerId; 2]) -> Team {
        Team::new(self.roster[ids[0].index()].clone(), self.roster[ids[1].index()].clone())
    }

    /// Build round `round`, recording every selected match in `ledger`.
    ///
    /// Game numbers are `(round - 1) * courts + court`, so a round that fills
    /// fewer courts leaves gaps in the numbering.
    pub fn build(&self, round: u32, order: &[PlayerId], ledger: &mut DiversityLedger) -> Vec<Match> {
        let mut pool = order.to_vec();
        let mut matches = Vec::with_capacity(self.courts as usize);

        for court in 1..=self.courts {
            if pool.len() < 4 {
                break;
            }
            let Some(pairing) = select_best_match(&pool, ledger) else {
                break;
            };

            let game_number = (round - 1) * self.courts + court;
            ledger.record_played(pairing.team1, pairing.team2);
            pool.retain(|&id| !pairing.contains(id));

            let m = Match::new(round, court, game_number, self.team(pairing.team1), self.team(pairing.team2));
            debug!(
                round,
                court,
                game_number,
                penalty = pairing.penalty,
                team1 = ?m.team1.0,
                team2 = ?m.team2.0,
                "scheduled match"
            );
            matches.push(m);
        }

        matches
    }
}

/// Produces the full schedule for a roster.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    policy: RoundCountPolicy,
}

impl ScheduleGenerator {
    pub fn new(policy: RoundCountPolicy) -> Self {
        Self { policy }
    }

    /// Generate every round for `players` on `courts` courts.
    ///
    /// Input is validated first; an invalid roster produces an error and no
    /// rounds. Between rounds the player ordering is rotated left by one so
    /// that the pairing search starts from a different neighbourhood.
    pub fn generate(&self, players: &[Player], courts: usize) -> Result<Vec<Round>, ConfigurationError> {
        validate_tournament_config(players.len(), courts)?;
        validate_players(players)?;

        let max_rounds = self.policy.rounds_for(players.len());
        if max_rounds == 0 {
            return Err(ConfigurationError::ZeroRounds {
                players: players.len(),
            });
        }

        // Roster size is capped at MAX_PLAYERS (64), so ids fit in a u8
        let mut order: Vec<PlayerId> = (0..players.len()).map(|i| PlayerId(i as u8)).collect();
        let mut ledger = DiversityLedger::new(players.len());
        let builder = RoundBuilder::new(players, courts as u32);

        let mut rounds = Vec::with_capacity(max_rounds);
        for r in 1..=max_rounds as u32 {
            let matches = builder.build(r, &order, &mut ledger);
            if matches.is_empty() {
                warn!(round = r, "dropping round with no matches");
            } else {
                rounds.push(Round { round: r, matches });
            }

            if (r as usize) < max_rounds {
                order.rotate_left(1);
            }
        }

        info!(
            players = players.len(),
            courts,
            rounds = rounds.len(),
            matches = rounds.iter().map(|r| r.matches.len()).sum::<usize>(),
            partnerships = ledger.distinct_partnerships(),
            opponent_pairs = ledger.distinct_opponent_pairs(),
            "generated schedule"
        );
        Ok(rounds)
    }
}

/// Generate a schedule with the default round-count table.
pub fn generate_schedule(players: &[Player], courts: usize) -> Result<Vec<Round>, ConfigurationError> {
    ScheduleGenerator::default().generate(players, courts)
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod schedule_tests;

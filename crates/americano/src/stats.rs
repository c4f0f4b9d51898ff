//! Per-player statistics and leaderboard ranking

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::schedule::{Match, Round, Team};
use crate::score::{MatchScore, ScoringMode, Side};
use crate::Player;

/// Points awarded per match won in set-points mode
pub const SET_MODE_MATCH_WIN_POINTS: u32 = 3;

/// Aggregated results for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player: Player,
    pub matches_played: u32,
    pub matches_won: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub win_percentage: f64,
    pub total_points: u32,
}

impl PlayerStats {
    pub fn new(player: impl Into<Player>) -> Self {
        Self {
            player: player.into(),
            matches_played: 0,
            matches_won: 0,
            sets_won: 0,
            sets_lost: 0,
            points_for: 0,
            points_against: 0,
            win_percentage: 0.0,
            total_points: 0,
        }
    }

    pub fn point_differential(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }

    /// Fold one completed match into these stats from `side`'s point of view.
    /// Scores loaded from a file are not validated here, so sums saturate.
    fn add_match(&mut self, score: &MatchScore, side: Side, mode: ScoringMode) {
        let (own, opp) = match side {
            Side::Team1 => (score.team1_score, score.team2_score),
            Side::Team2 => (score.team2_score, score.team1_score),
        };

        self.matches_played = self.matches_played.saturating_add(1);
        if own > opp {
            self.matches_won = self.matches_won.saturating_add(1);
        }

        for set in &score.sets {
            match set.winner() {
                Some(winner) if winner == side => self.sets_won = self.sets_won.saturating_add(1),
                Some(_) => self.sets_lost = self.sets_lost.saturating_add(1),
                None => {}
            }
        }

        match mode {
            ScoringMode::SetPoints if score.has_sets() => {
                for set in &score.sets {
                    let (set_own, set_opp) = match side {
                        Side::Team1 => (set.team1, set.team2),
                        Side::Team2 => (set.team2, set.team1),
                    };
                    self.points_for = self.points_for.saturating_add(set_own);
                    self.points_against = self.points_against.saturating_add(set_opp);
                }
            }
            _ => {
                self.points_for = self.points_for.saturating_add(own);
                self.points_against = self.points_against.saturating_add(opp);
            }
        }
    }

    fn finish(&mut self, mode: ScoringMode) {
        self.win_percentage = if self.matches_played == 0 {
            0.0
        } else {
            f64::from(self.matches_won) / f64::from(self.matches_played) * 100.0
        };
        self.total_points = match mode {
            ScoringMode::RawPoints => self.points_for,
            ScoringMode::SetPoints => self
                .matches_won
                .saturating_mul(SET_MODE_MATCH_WIN_POINTS)
                .saturating_add(self.sets_won),
        };
    }
}

/// Aggregate completed matches into per-player statistics.
///
/// Every player named in the schedule gets an entry (zeroed if none of their
/// matches are completed yet), in order of first appearance. Pending matches
/// and matches without a score contribute nothing.
pub fn calculate_player_stats(rounds: &[Round], mode: ScoringMode) -> Vec<PlayerStats> {
    let mut stats: Vec<PlayerStats> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in rounds.iter().flat_map(|r| &r.matches) {
        for player in m.players() {
            index.entry(player.as_str()).or_insert_with(|| {
                stats.push(PlayerStats::new(player.clone()));
                stats.len() - 1
            });
        }

        let Some(score) = m.completed_score() else {
            continue;
        };
        for (team, side) in sides(m) {
            for player in team.players() {
                stats[index[player.as_str()]].add_match(score, side, mode);
            }
        }
    }

    for entry in &mut stats {
        entry.finish(mode);
    }
    stats
}

fn sides(m: &Match) -> [(&Team, Side); 2] {
    [(&m.team1, Side::Team1), (&m.team2, Side::Team2)]
}

/// Leaderboard order: total points, then point differential, then matches
/// won (all descending), then player name ascending.
pub fn leaderboard_order(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| b.point_differential().cmp(&a.point_differential()))
        .then_with(|| b.matches_won.cmp(&a.matches_won))
        .then_with(|| a.player.cmp(&b.player))
}

/// Sort stats into leaderboard order. The result is fully deterministic.
pub fn rank_leaderboard(mut stats: Vec<PlayerStats>) -> Vec<PlayerStats> {
    stats.sort_by(leaderboard_order);
    stats
}

/// Render a ranked leaderboard as a fixed-width table
pub fn format_leaderboard(ranked: &[PlayerStats]) -> String {
    let mut out = String::new();
    out.push_str("=== Leaderboard ===\n");
    out.push_str(&format!(
        "{:>4} {:<20} {:>6} {:>4} {:>6} {:>6} {:>6} {:>7}\n",
        "#", "Player", "Played", "Won", "Win%", "For", "Diff", "Points"
    ));
    out.push_str(&"-".repeat(66));
    out.push('\n');
    for (i, s) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:<20} {:>6} {:>4} {:>6.1} {:>6} {:>+6} {:>7}\n",
            i + 1,
            s.player,
            s.matches_played,
            s.matches_won,
            s.win_percentage,
            s.points_for,
            s.point_differential(),
            s.total_points
        ));
    }
    out
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;

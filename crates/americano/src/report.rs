//! Schedule quality reporting

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::schedule::Round;
use crate::Player;

/// A pair of players that met more than once, and how often
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedPair {
    pub players: (Player, Player),
    pub times: u32,
}

/// Players sitting out a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingPlayers {
    pub round: u32,
    pub players: Vec<Player>,
}

/// How varied a schedule's partnerships and match-ups are
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiversityReport {
    pub rounds: usize,
    pub matches: usize,
    pub distinct_partnerships: usize,
    /// Partnerships formed more than once
    pub repeated_partnerships: Vec<RepeatedPair>,
    pub distinct_opponent_pairs: usize,
    /// Opponent pairings that occurred more than once
    pub repeated_opponents: Vec<RepeatedPair>,
    /// Matches scheduled per player, in roster order
    pub matches_per_player: Vec<(Player, u32)>,
    pub resting: Vec<RestingPlayers>,
}

fn pair_key(a: &Player, b: &Player) -> (Player, Player) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

fn repeats(counts: &BTreeMap<(Player, Player), u32>) -> Vec<RepeatedPair> {
    counts
        .iter()
        .filter(|(_, times)| **times > 1)
        .map(|(players, &times)| RepeatedPair {
            players: players.clone(),
            times,
        })
        .collect()
}

impl DiversityReport {
    /// Summarize `rounds` for the given roster.
    pub fn from_rounds(players: &[Player], rounds: &[Round]) -> Self {
        let mut partnerships: BTreeMap<(Player, Player), u32> = BTreeMap::new();
        let mut opponents: BTreeMap<(Player, Player), u32> = BTreeMap::new();
        let mut played: BTreeMap<&str, u32> = BTreeMap::new();
        let mut resting = Vec::new();
        let mut matches = 0;

        for round in rounds {
            for m in &round.matches {
                matches += 1;
                for team in [&m.team1, &m.team2] {
                    *partnerships.entry(team.key()).or_insert(0) += 1;
                }
                for a in m.team1.players() {
                    for b in m.team2.players() {
                        *opponents.entry(pair_key(a, b)).or_insert(0) += 1;
                    }
                }
                for p in m.players() {
                    *played.entry(p.as_str()).or_insert(0) += 1;
                }
            }

            let active: HashSet<&str> = round.players().map(String::as_str).collect();
            let idle: Vec<Player> = players
                .iter()
                .filter(|p| !active.contains(p.as_str()))
                .cloned()
                .collect();
            if !idle.is_empty() {
                resting.push(RestingPlayers {
                    round: round.round,
                    players: idle,
                });
            }
        }

        Self {
            rounds: rounds.len(),
            matches,
            distinct_partnerships: partnerships.len(),
            repeated_partnerships: repeats(&partnerships),
            distinct_opponent_pairs: opponents.len(),
            repeated_opponents: repeats(&opponents),
            matches_per_player: players
                .iter()
                .map(|p| (p.clone(), played.get(p.as_str()).copied().unwrap_or(0)))
                .collect(),
            resting,
        }
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Diversity ===\n");
        report.push_str(&format!("Rounds: {}, Matches: {}\n", self.rounds, self.matches));
        report.push_str(&format!(
            "Partnerships: {} distinct, {} repeated\n",
            self.distinct_partnerships,
            self.repeated_partnerships.len()
        ));
        for pair in &self.repeated_partnerships {
            report.push_str(&format!("  {} & {} x{}\n", pair.players.0, pair.players.1, pair.times));
        }
        report.push_str(&format!(
            "Opponent pairs: {} distinct, {} repeated\n",
            self.distinct_opponent_pairs,
            self.repeated_opponents.len()
        ));

        report.push_str("Matches per player:\n");
        for (player, count) in &self.matches_per_player {
            report.push_str(&format!("  {:<20} {:>3}\n", player, count));
        }

        if !self.resting.is_empty() {
            report.push_str("Resting:\n");
            for rest in &self.resting {
                report.push_str(&format!("  Round {:>2}: {}\n", rest.round, rest.players.join(", ")));
            }
        }
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

/// Render the schedule as text, one line per match
pub fn format_schedule(rounds: &[Round]) -> String {
    let mut out = String::new();
    for round in rounds {
        out.push_str(&format!("--- Round {} ---\n", round.round));
        for m in &round.matches {
            let result = match m.completed_score() {
                Some(score) => format!("{}-{}", score.team1_score, score.team2_score),
                None => "pending".to_string(),
            };
            out.push_str(&format!(
                "Game {:>3}  Court {:>2}: {} & {} vs {} & {}  [{}]\n",
                m.game_number, m.court, m.team1.0[0], m.team1.0[1], m.team2.0[0], m.team2.0[1], result
            ));
        }
    }
    out
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;

//! Best-match selection from a pool of available players.
//!
//! The search is exhaustive: every 4-player subset of the pool (in ascending
//! index order) and each of its three team splits is scored against the
//! [`DiversityLedger`]. That is O(k⁴) in the pool size `k`, fine for a few
//! dozen players but not for hundreds; rosters are capped at [`MAX_PLAYERS`].
//!
//! [`MAX_PLAYERS`]: crate::MAX_PLAYERS

use crate::ledger::{DiversityLedger, PlayerId};

/// Added for each team whose two players have partnered before.
pub const PARTNER_REPEAT_PENALTY: u32 = 10;

/// Added for each cross-team pair that has faced each other before.
pub const OPPONENT_REPEAT_PENALTY: u32 = 5;

/// A selected grouping of four players into two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub team1: [PlayerId; 2],
    pub team2: [PlayerId; 2],
    /// Repeat penalty of this split at the time it was selected
    pub penalty: u32,
}

impl Pairing {
    /// The four players, team1 first.
    pub fn players(&self) -> [PlayerId; 4] {
        [self.team1[0], self.team1[1], self.team2[0], self.team2[1]]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players().contains(&id)
    }
}

/// The three ways to split four players into two unordered teams of two.
#[inline]
fn team_splits(quad: [PlayerId; 4]) -> [([PlayerId; 2], [PlayerId; 2]); 3] {
    let [a, b, c, d] = quad;
    [([a, b], [c, d]), ([a, c], [b, d]), ([a, d], [b, c])]
}

/// Repeat penalty of playing `team1` against `team2` given the history so far.
///
/// Ranges from 0 (all fresh) to 40 (both partnerships and all four
/// cross-team pairings repeated).
pub fn repeat_penalty(team1: [PlayerId; 2], team2: [PlayerId; 2], ledger: &DiversityLedger) -> u32 {
    let mut penalty = 0;
    if ledger.has_partnered(team1[0], team1[1]) {
        penalty += PARTNER_REPEAT_PENALTY;
    }
    if ledger.has_partnered(team2[0], team2[1]) {
        penalty += PARTNER_REPEAT_PENALTY;
    }
    for &a in &team1 {
        for &b in &team2 {
            if ledger.has_opposed(a, b) {
                penalty += OPPONENT_REPEAT_PENALTY;
            }
        }
    }
    penalty
}

/// Select the grouping and team split with the lowest repeat penalty.
///
/// Only a strict improvement replaces the current best, so among equally
/// penalized candidates the first one enumerated wins. Returns `None` when
/// fewer than four players are available.
pub fn select_best_match(pool: &[PlayerId], ledger: &DiversityLedger) -> Option<Pairing> {
    let k = pool.len();
    if k < 4 {
        return None;
    }

    let mut best: Option<Pairing> = None;
    for i in 0..k {
        for j in (i + 1)..k {
            for l in (j + 1)..k {
                for m in (l + 1)..k {
                    let quad = [pool[i], pool[j], pool[l], pool[m]];
                    for (team1, team2) in team_splits(quad) {
                        let penalty = repeat_penalty(team1, team2, ledger);
                        if best.map_or(true, |b| penalty < b.penalty) {
                            best = Some(Pairing {
                                team1,
                                team2,
                                penalty,
                            });
                            // Nothing can strictly beat zero
                            if penalty == 0 {
                                return best;
                            }
                        }
                    }
                }
            }
        }
    }
    best
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod pairing_tests;

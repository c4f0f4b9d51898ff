//! Partner/opponent history for one schedule-generation run.
//!
//! Players are assigned dense ids `0..N` when generation starts, so the ledger
//! is a pair of adjacency matrices stored as one 64-bit row per player. Bit `j`
//! of row `i` is set when players `i` and `j` have partnered (or opposed).
//! Both matrices are kept symmetric.

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Largest roster the ledger (and the exhaustive pairing search) supports.
pub const MAX_PLAYERS: usize = 64;

/// Dense index of a player within a single generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A set of players as a 64-bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerSet(pub u64);

impl PlayerSet {
    pub const EMPTY: PlayerSet = PlayerSet(0);

    /// Create a set with a single player.
    #[inline(always)]
    pub const fn single(id: PlayerId) -> Self {
        PlayerSet(1u64 << id.0)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn contains(self, id: PlayerId) -> bool {
        (self.0 & (1u64 << id.0)) != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, id: PlayerId) {
        self.0 |= 1u64 << id.0;
    }

    /// Number of players in the set.
    #[inline(always)]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Get and remove the lowest id in the set.
    #[inline(always)]
    pub fn pop_first(&mut self) -> Option<PlayerId> {
        if self.0 == 0 {
            None
        } else {
            let id = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(PlayerId(id))
        }
    }
}

impl BitAnd for PlayerSet {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        PlayerSet(self.0 & rhs.0)
    }
}

impl BitOr for PlayerSet {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        PlayerSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for PlayerSet {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Iterates ids in ascending order.
impl Iterator for PlayerSet {
    type Item = PlayerId;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_first()
    }
}

/// Who has partnered and who has faced whom so far in this run.
///
/// The ledger only grows: there is no way to forget a recorded match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiversityLedger {
    partners: Vec<PlayerSet>,
    opponents: Vec<PlayerSet>,
}

impl DiversityLedger {
    /// Create an empty ledger for `player_count` players (ids `0..player_count`).
    ///
    /// `player_count` must not exceed [`MAX_PLAYERS`]; the generator checks this
    /// before building a ledger.
    pub fn new(player_count: usize) -> Self {
        debug_assert!(player_count <= MAX_PLAYERS);
        Self {
            partners: vec![PlayerSet::EMPTY; player_count],
            opponents: vec![PlayerSet::EMPTY; player_count],
        }
    }

    pub fn player_count(&self) -> usize {
        self.partners.len()
    }

    /// Record a played (or scheduled) match.
    pub fn record_played(&mut self, team1: [PlayerId; 2], team2: [PlayerId; 2]) {
        self.link_partners(team1[0], team1[1]);
        self.link_partners(team2[0], team2[1]);
        for &a in &team1 {
            for &b in &team2 {
                self.opponents[a.index()].insert(b);
                self.opponents[b.index()].insert(a);
            }
        }
    }

    fn link_partners(&mut self, a: PlayerId, b: PlayerId) {
        self.partners[a.index()].insert(b);
        self.partners[b.index()].insert(a);
    }

    #[inline(always)]
    pub fn has_partnered(&self, a: PlayerId, b: PlayerId) -> bool {
        self.partners[a.index()].contains(b)
    }

    #[inline(always)]
    pub fn has_opposed(&self, a: PlayerId, b: PlayerId) -> bool {
        self.opponents[a.index()].contains(b)
    }

    /// Everyone `player` has partnered with so far.
    pub fn partners_of(&self, player: PlayerId) -> PlayerSet {
        self.partners[player.index()]
    }

    /// Everyone `player` has faced so far.
    pub fn opponents_of(&self, player: PlayerId) -> PlayerSet {
        self.opponents[player.index()]
    }

    /// Number of distinct partnerships recorded.
    pub fn distinct_partnerships(&self) -> usize {
        self.ids().map(|id| self.partners_of(id).len() as usize).sum::<usize>() / 2
    }

    /// Number of distinct player pairs that have faced each other.
    pub fn distinct_opponent_pairs(&self) -> usize {
        self.ids().map(|id| self.opponents_of(id).len() as usize).sum::<usize>() / 2
    }

    fn ids(&self) -> impl Iterator<Item = PlayerId> {
        // player_count <= MAX_PLAYERS, so every index fits in a u8
        (0..self.player_count()).map(|i| PlayerId(i as u8))
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod ledger_tests;

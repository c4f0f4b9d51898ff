//! Americano doubles scheduler
//!
//! This crate provides infrastructure for:
//! - Validating tournament configuration (players, courts, points per match)
//! - Generating a rotating-partner schedule that minimizes repeat partners and opponents
//! - Validating submitted match scores
//! - Aggregating completed matches into per-player statistics and a ranked leaderboard
//!
//! Everything in the library is a pure, synchronous computation over plain data.
//!
//! # Usage
//!
//! ```bash
//! # Generate a schedule for eight players on two courts
//! cargo run -p americano -- schedule --player Ana --player Ben ... --courts 2
//!
//! # Rank players from a scored schedule
//! cargo run -p americano -- leaderboard --rounds rounds.json --mode raw-points
//! ```

mod config;
mod error;
mod ledger;
mod pairing;
mod report;
mod schedule;
mod score;
mod stats;

pub use config::*;
pub use error::*;
pub use ledger::*;
pub use pairing::*;
pub use report::*;
pub use schedule::*;
pub use score::*;
pub use stats::*;

/// A player is identified by name. Names are case-sensitive once stored.
pub type Player = String;

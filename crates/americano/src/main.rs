//! Americano CLI
//!
//! Generate schedules, check scores and print leaderboards.

use americano::{
    calculate_player_stats, format_leaderboard, format_schedule, rank_leaderboard, validate_match_score,
    DiversityReport, Player, Round, RoundCountPolicy, ScheduleGenerator, ScoringMode, TournamentConfig,
    DEFAULT_FIXED_POINT_TOTAL,
};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Americano doubles scheduler
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a schedule
    Schedule {
        /// TOML tournament configuration; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Add a player (repeat for each player, in order)
        #[arg(long = "player")]
        players: Vec<Player>,

        /// Number of courts [default: players / 4]
        #[arg(long)]
        courts: Option<usize>,

        /// Override the round count for a roster size, e.g. 8=7
        #[arg(long = "rounds-for", value_parser = parse_round_override)]
        rounds_for: Vec<(usize, usize)>,

        /// Schedule players - 1 rounds so everyone can partner everyone
        #[arg(long)]
        full_rotation: bool,

        /// Shuffle the player order with this seed before scheduling
        #[arg(long)]
        seed: Option<u64>,

        /// Print the rounds as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rank players from a scored schedule (JSON rounds)
    Leaderboard {
        /// Rounds file as written by `schedule --json`, with scores filled in
        #[arg(long)]
        rounds: PathBuf,

        /// raw-points or set-points
        #[arg(long, default_value_t = ScoringMode::RawPoints)]
        mode: ScoringMode,

        /// Print the ranked stats as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check a fixed-total match score
    CheckScore {
        #[arg(allow_negative_numbers = true)]
        team1: i64,

        #[arg(allow_negative_numbers = true)]
        team2: i64,

        /// Points a match must add up to
        #[arg(long, default_value_t = DEFAULT_FIXED_POINT_TOTAL)]
        total: u32,
    },
}

fn parse_round_override(s: &str) -> Result<(usize, usize), String> {
    let (players, rounds) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PLAYERS=ROUNDS, got {s}"))?;
    let players = players.trim().parse::<usize>().map_err(|e| format!("bad player count: {e}"))?;
    let rounds = rounds.trim().parse::<usize>().map_err(|e| format!("bad round count: {e}"))?;
    Ok((players, rounds))
}

fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn run_schedule(
    config_path: Option<PathBuf>,
    players: Vec<Player>,
    courts: Option<usize>,
    rounds_for: Vec<(usize, usize)>,
    full_rotation: bool,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            TournamentConfig::from_toml_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => TournamentConfig::new(Vec::new(), 0),
    };

    if !players.is_empty() {
        config.players = players;
    }
    if let Some(courts) = courts {
        config.courts = courts;
    } else if config_path.is_none() {
        config.courts = config.players.len() / 4;
    }
    if full_rotation {
        config.round_policy = RoundCountPolicy::full_rotation();
    }
    for (players, rounds) in rounds_for {
        config.round_policy = config.round_policy.with_override(players, rounds);
    }
    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        config.players.shuffle(&mut rng);
        info!(seed, "shuffled player order");
    }

    config.validate()?;
    let rounds = ScheduleGenerator::new(config.round_policy.clone()).generate(&config.players, config.courts)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rounds)?);
        return Ok(());
    }

    println!("=== {} ===", config.name);
    println!(
        "Players: {}, Courts: {}, Points per match: {}",
        config.players.len(),
        config.courts,
        config.points_per_match
    );
    println!();
    print!("{}", format_schedule(&rounds));
    println!();
    DiversityReport::from_rounds(&config.players, &rounds).print_report();
    Ok(())
}

fn run_leaderboard(path: PathBuf, mode: ScoringMode, json: bool) -> anyhow::Result<()> {
    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let rounds: Vec<Round> =
        serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;

    let ranked = rank_leaderboard(calculate_player_stats(&rounds, mode));
    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        println!("Scoring: {mode}");
        print!("{}", format_leaderboard(&ranked));
    }
    Ok(())
}

fn run_check_score(team1: i64, team2: i64, total: u32) -> anyhow::Result<()> {
    let result = validate_match_score(team1, team2, total);
    println!("{team1}-{team2}: total {} of {total}", result.total_points);
    if result.is_valid {
        println!("valid");
        return Ok(());
    }
    for err in &result.errors {
        eprintln!("  {err}");
    }
    bail!("score rejected")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger();

    match args.command {
        Command::Schedule {
            config,
            players,
            courts,
            rounds_for,
            full_rotation,
            seed,
            json,
        } => run_schedule(config, players, courts, rounds_for, full_rotation, seed, json),
        Command::Leaderboard { rounds, mode, json } => run_leaderboard(rounds, mode, json),
        Command::CheckScore { team1, team2, total } => run_check_score(team1, team2, total),
    }
}

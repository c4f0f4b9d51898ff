use super::*;
use crate::schedule::{MatchStatus, Team};
use crate::score::SetScore;

fn completed(game_number: u32, team1: [&str; 2], team2: [&str; 2], score: MatchScore) -> Match {
    let mut m = Match::new(1, 1, game_number, Team::new(team1[0], team1[1]), Team::new(team2[0], team2[1]));
    m.score = Some(score);
    m.status = MatchStatus::Completed;
    m
}

fn find<'a>(stats: &'a [PlayerStats], player: &str) -> &'a PlayerStats {
    stats.iter().find(|s| s.player == player).unwrap()
}

#[test]
fn test_single_match_raw_points() {
    let rounds = vec![Round {
        round: 1,
        matches: vec![completed(1, ["A", "B"], ["C", "D"], MatchScore::new(10, 6))],
    }];
    let stats = calculate_player_stats(&rounds, ScoringMode::RawPoints);

    assert_eq!(stats.len(), 4);
    for player in ["A", "B"] {
        let s = find(&stats, player);
        assert_eq!(s.total_points, 10);
        assert_eq!(s.matches_played, 1);
        assert_eq!(s.matches_won, 1);
        assert_eq!(s.points_against, 6);
        assert!((s.win_percentage - 100.0).abs() < 1e-9);
    }
    for player in ["C", "D"] {
        let s = find(&stats, player);
        assert_eq!(s.total_points, 6);
        assert_eq!(s.matches_played, 1);
        assert_eq!(s.matches_won, 0);
        assert_eq!(s.win_percentage, 0.0);
    }
}

#[test]
fn test_pending_matches_are_ignored() {
    let mut pending = Match::new(1, 2, 2, Team::new("E", "F"), Team::new("G", "H"));
    // A score without completed status does not count either
    pending.score = Some(MatchScore::new(16, 0));

    let rounds = vec![Round {
        round: 1,
        matches: vec![completed(1, ["A", "B"], ["C", "D"], MatchScore::new(9, 7)), pending],
    }];
    let stats = calculate_player_stats(&rounds, ScoringMode::RawPoints);

    assert_eq!(stats.len(), 8);
    let e = find(&stats, "E");
    assert_eq!(e.matches_played, 0);
    assert_eq!(e.total_points, 0);
    assert_eq!(e.win_percentage, 0.0);
    // First-appearance order
    let order: Vec<&str> = stats.iter().map(|s| s.player.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
}

#[test]
fn test_draw_is_not_a_win() {
    let rounds = vec![Round {
        round: 1,
        matches: vec![completed(1, ["A", "B"], ["C", "D"], MatchScore::new(8, 8))],
    }];
    let stats = calculate_player_stats(&rounds, ScoringMode::RawPoints);
    assert!(stats.iter().all(|s| s.matches_won == 0 && s.total_points == 8));
}

#[test]
fn test_set_points_mode() {
    let score = MatchScore::from_sets(vec![SetScore::new(6, 4), SetScore::new(3, 6), SetScore::new(6, 2)]);
    let rounds = vec![Round {
        round: 1,
        matches: vec![completed(1, ["A", "B"], ["C", "D"], score)],
    }];
    let stats = calculate_player_stats(&rounds, ScoringMode::SetPoints);

    let a = find(&stats, "A");
    assert_eq!(a.matches_won, 1);
    assert_eq!(a.sets_won, 2);
    assert_eq!(a.sets_lost, 1);
    assert_eq!(a.points_for, 15);
    assert_eq!(a.points_against, 12);
    assert_eq!(a.total_points, 3 + 2);

    let c = find(&stats, "C");
    assert_eq!(c.matches_won, 0);
    assert_eq!(c.sets_won, 1);
    assert_eq!(c.total_points, 1);
}

#[test]
fn test_same_data_differs_by_mode() {
    let score = MatchScore::from_sets(vec![SetScore::new(6, 4), SetScore::new(6, 4)]);
    let rounds = vec![Round {
        round: 1,
        matches: vec![completed(1, ["A", "B"], ["C", "D"], score)],
    }];

    let raw = calculate_player_stats(&rounds, ScoringMode::RawPoints);
    let sets = calculate_player_stats(&rounds, ScoringMode::SetPoints);

    // Raw mode counts the declared match score (2 sets to 0)
    assert_eq!(find(&raw, "A").total_points, 2);
    assert_eq!(find(&raw, "A").points_for, 2);
    assert_eq!(find(&raw, "A").sets_won, 2);
    assert_eq!(find(&sets, "A").total_points, 5);
    assert_eq!(find(&sets, "A").points_for, 12);
}

#[test]
fn test_unvalidated_huge_scores_saturate() {
    let rounds = vec![Round {
        round: 1,
        matches: vec![
            completed(1, ["A", "B"], ["C", "D"], MatchScore::new(u32::MAX, 0)),
            completed(2, ["A", "B"], ["C", "D"], MatchScore::new(u32::MAX, 0)),
        ],
    }];

    let stats = calculate_player_stats(&rounds, ScoringMode::RawPoints);
    let a = find(&stats, "A");
    assert_eq!(a.matches_won, 2);
    assert_eq!(a.points_for, u32::MAX);
    assert_eq!(a.total_points, u32::MAX);
    assert_eq!(find(&stats, "C").points_against, u32::MAX);

    let ranked = rank_leaderboard(stats);
    assert_eq!(ranked[0].player, "A");
}

#[test]
fn test_leaderboard_tie_breaks() {
    let mut a = PlayerStats::new("Ana");
    a.total_points = 20;
    a.points_for = 20;
    a.points_against = 12;

    let mut b = PlayerStats::new("Ben");
    b.total_points = 20;
    b.points_for = 20;
    b.points_against = 8;

    let mut c = PlayerStats::new("Cleo");
    c.total_points = 25;

    let mut d = PlayerStats::new("Abe");
    d.total_points = 20;
    d.points_for = 20;
    d.points_against = 12;

    let ranked = rank_leaderboard(vec![a, b, c, d]);
    let order: Vec<&str> = ranked.iter().map(|s| s.player.as_str()).collect();
    assert_eq!(order, vec!["Cleo", "Ben", "Abe", "Ana"]);
}

#[test]
fn test_format_leaderboard() {
    let rounds = vec![Round {
        round: 1,
        matches: vec![completed(1, ["A", "B"], ["C", "D"], MatchScore::new(10, 6))],
    }];
    let ranked = rank_leaderboard(calculate_player_stats(&rounds, ScoringMode::RawPoints));
    let table = format_leaderboard(&ranked);

    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3 + 4);
    assert!(lines[3].trim_start().starts_with("1 A"));
    assert!(lines[3].contains("+4"));
    assert!(lines[6].contains("-4"));
}

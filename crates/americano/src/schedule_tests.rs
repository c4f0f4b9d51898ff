use super::*;
use crate::score::{ScoringMode, SetScore};
use std::collections::HashSet;

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| char::from(b'A' + i as u8).to_string()).collect()
}

#[test]
fn test_first_round_fills_courts_in_order() {
    let rounds = generate_schedule(&roster(8), 2).unwrap();
    let first = &rounds[0];

    assert_eq!(first.round, 1);
    assert_eq!(first.matches.len(), 2);
    assert_eq!(first.matches[0].team1, Team::new("A", "B"));
    assert_eq!(first.matches[0].team2, Team::new("C", "D"));
    assert_eq!(first.matches[1].team1, Team::new("E", "F"));
    assert_eq!(first.matches[1].team2, Team::new("G", "H"));
    assert_eq!(first.matches[0].court, 1);
    assert_eq!(first.matches[1].court, 2);
}

#[test]
fn test_second_round_after_rotation() {
    let rounds = generate_schedule(&roster(8), 2).unwrap();
    let second = &rounds[1];

    assert_eq!(second.matches[0].team1, Team::new("B", "C"));
    assert_eq!(second.matches[0].team2, Team::new("E", "G"));
    assert_eq!(second.matches[1].team1, Team::new("D", "A"));
    assert_eq!(second.matches[1].team2, Team::new("F", "H"));
}

#[test]
fn test_game_numbers_follow_round_and_court() {
    let rounds = generate_schedule(&roster(16), 3).unwrap();
    for round in &rounds {
        for m in &round.matches {
            assert_eq!(m.round, round.round);
            assert_eq!(m.game_number, (round.round - 1) * 3 + m.court);
        }
    }
}

#[test]
fn test_single_court_sits_players_out() {
    let rounds = generate_schedule(&roster(8), 1).unwrap();
    assert_eq!(rounds.len(), 3);
    for round in &rounds {
        assert_eq!(round.matches.len(), 1);
        assert_eq!(round.players().count(), 4);
    }
    let numbers: Vec<u32> = rounds.iter().map(|r| r.matches[0].game_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_four_players_with_more_rounds() {
    let policy = RoundCountPolicy::default().with_override(4, 3);
    let rounds = ScheduleGenerator::new(policy).generate(&roster(4), 1).unwrap();

    assert_eq!(rounds.len(), 3);
    let partnerships: HashSet<(Player, Player)> = rounds
        .iter()
        .flat_map(|r| &r.matches)
        .flat_map(|m| [m.team1.key(), m.team2.key()])
        .collect();
    // Three rounds of four players cover all six partnerships exactly once
    assert_eq!(partnerships.len(), 6);
}

#[test]
fn test_invalid_input_produces_no_schedule() {
    assert_eq!(generate_schedule(&roster(6), 1), Err(ConfigurationError::PlayersNotMultipleOfFour));
    assert_eq!(generate_schedule(&roster(8), 3), Err(ConfigurationError::TooManyCourts));

    let mut dup = roster(4);
    dup[1] = "a".to_string();
    assert_eq!(
        generate_schedule(&dup, 1),
        Err(ConfigurationError::DuplicatePlayer("a".to_string()))
    );
}

#[test]
fn test_new_matches_are_pending() {
    let rounds = generate_schedule(&roster(8), 2).unwrap();
    for m in rounds.iter().flat_map(|r| &r.matches) {
        assert_eq!(m.status, MatchStatus::Pending);
        assert!(m.score.is_none());
        assert!(m.completed_score().is_none());
    }
}

#[test]
fn test_record_score_once() {
    let mut rounds = generate_schedule(&roster(8), 2).unwrap();
    let rules = ScoreRules::default();

    record_match_score(&mut rounds, 2, MatchScore::new(9, 7), &rules).unwrap();
    let m = &rounds[0].matches[1];
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(m.completed_score(), Some(&MatchScore::new(9, 7)));

    assert_eq!(
        record_match_score(&mut rounds, 2, MatchScore::new(8, 8), &rules),
        Err(ValidationError::AlreadyScored(2))
    );
    assert_eq!(
        record_match_score(&mut rounds, 99, MatchScore::new(8, 8), &rules),
        Err(ValidationError::UnknownGame(99))
    );
}

#[test]
fn test_rejected_score_leaves_match_pending() {
    let mut rounds = generate_schedule(&roster(4), 1).unwrap();
    let rules = ScoreRules::default();

    let err = record_match_score(&mut rounds, 1, MatchScore::new(10, 10), &rules).unwrap_err();
    assert!(matches!(err, ValidationError::WrongTotal { total: 20, expected: 16 }));
    assert_eq!(rounds[0].matches[0].status, MatchStatus::Pending);
    assert!(rounds[0].matches[0].score.is_none());

    let set_rules = ScoreRules::new(ScoringMode::SetPoints, 16);
    let score = MatchScore::from_sets(vec![SetScore::new(6, 2), SetScore::new(6, 4)]);
    record_match_score(&mut rounds, 1, score, &set_rules).unwrap();
    assert_eq!(rounds[0].matches[0].status, MatchStatus::Completed);
}

#[test]
fn test_team_key_is_order_independent() {
    assert_eq!(Team::new("Zoe", "Ana").key(), Team::new("Ana", "Zoe").key());
    assert!(Team::new("Ana", "Zoe").contains("Zoe"));
    assert!(!Team::new("Ana", "Zoe").contains("zoe"));
}

#[test]
fn test_round_json_shape() {
    let rounds = generate_schedule(&roster(4), 1).unwrap();
    let json = serde_json::to_value(&rounds).unwrap();
    let m = &json[0]["matches"][0];

    assert_eq!(m["gameNumber"], 1);
    assert_eq!(m["court"], 1);
    assert_eq!(m["status"], "pending");
    assert_eq!(m["team1"], serde_json::json!(["A", "B"]));
    assert!(m.get("score").is_none());

    let back: Vec<Round> = serde_json::from_value(json).unwrap();
    assert_eq!(back, rounds);
}

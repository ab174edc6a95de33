// Tests for the replay module
//
// Covers:
// - Loading JSONL decision logs
// - Replaying individual decisions and specific rounds
// - Validating expected actions
// - Round trip from the debug logger into the replay engine

use snakego_bot::config::Config;
use snakego_bot::debug_logger::DebugLogger;
use snakego_bot::replay::ReplayEngine;
use snakego_bot::types::{Action, Context, Coord, Snake};
use std::path::PathBuf;

/// Helper function to get the path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn engine() -> ReplayEngine {
    ReplayEngine::new(Config::default_hardcoded(), false)
}

#[test]
fn test_load_log_file_item_chase() {
    let entries = engine()
        .load_log_file(fixture_path("item_chase.jsonl"))
        .expect("Failed to load item_chase.jsonl");

    assert_eq!(entries.len(), 4, "Expected 4 log entries");
    assert_eq!(entries[0].round, 1);
    assert_eq!(entries[0].action, "up");
    assert_eq!(entries[2].snake_id, 2);
    assert_eq!(entries[3].action, "fire");

    // The -1 sentinel slot decodes to no railgun, a real item to Some
    assert!(!entries[0].context.my_snakes[0].has_railgun());
    assert!(entries[3].context.my_snakes[0].has_railgun());
}

#[test]
fn test_replay_all_reports_the_mismatch() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("item_chase.jsonl"))
        .unwrap();

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), 4);

    let stats = engine.generate_stats(&results);
    assert_eq!(stats.matches, 3);
    assert_eq!(stats.mismatches, 1);
    assert!((stats.match_rate - 75.0).abs() < 1e-9);

    // Secondary snake in the top-right corner: right and up leave the board
    let mismatch = results.iter().find(|r| !r.matches).unwrap();
    assert_eq!(mismatch.round, 2);
    assert_eq!(mismatch.snake_id, 2);
    assert_eq!(mismatch.original_action, Action::MoveDown);
    assert_eq!(mismatch.replayed_action, Action::MoveLeft);
}

#[test]
fn test_replay_specific_round_covers_every_snake() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("item_chase.jsonl"))
        .unwrap();

    let results = engine.replay_rounds(&entries, &[2]).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].replayed_action, Action::MoveUp);

    assert!(engine.replay_rounds(&entries, &[40]).is_err());
}

#[test]
fn test_validate_fixture_actions() {
    let engine = engine();
    let entries = engine
        .load_log_file(fixture_path("item_chase.jsonl"))
        .unwrap();

    assert!(engine
        .validate_expected_actions(
            &entries,
            &[(1, vec![Action::MoveUp]), (3, vec![Action::FireRailgun])]
        )
        .is_ok());
    assert!(engine
        .validate_expected_actions(&entries, &[(1, vec![Action::MoveRight])])
        .is_err());
}

#[test]
fn test_missing_log_file_is_an_error() {
    assert!(engine()
        .load_log_file(fixture_path("does_not_exist.jsonl"))
        .is_err());
}

#[tokio::test]
async fn test_logged_decisions_replay_without_mismatches() {
    let path = std::env::temp_dir().join("snakego_replay_round_trip.jsonl");
    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;

    let config = Config::default_hardcoded();
    let bot = snakego_bot::bot::Bot::new(config.clone());

    for round in 1..=5 {
        let mut ctx = Context::empty(8, 8, round);
        ctx.add_snake(
            Snake {
                id: 1,
                coord_list: vec![Coord { x: round, y: 2 }, Coord { x: round - 1, y: 2 }],
                railgun_item: None,
            },
            true,
        );
        let snake = ctx.my_snakes[0].clone();
        let action = bot.decide(&snake, &ctx);
        logger.log_decision_now(snake.id, ctx, action).await;
    }

    let engine = ReplayEngine::new(config, false);
    let entries = engine.load_log_file(&path).unwrap();
    let results = engine.replay_all(&entries);
    let stats = engine.generate_stats(&results);

    assert_eq!(stats.total_decisions, 5);
    assert_eq!(stats.mismatches, 0);

    let _ = std::fs::remove_file(&path);
}

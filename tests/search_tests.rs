//! Search tests to verify the engine finds correct moves in various positions.

use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use mailbox_chess::board::{
    find_best_move, find_best_move_parallel, minimax, search, MaterialEvaluator, Position,
    SearchLimits, MATE_SCORE,
};

fn best(fen: &str, depth: u32) -> (String, i32) {
    let position = Position::from_fen(fen).unwrap();
    let stop = AtomicBool::new(false);
    let result = find_best_move(&position, &SearchLimits::depth(depth), &MaterialEvaluator, &stop);
    let mv = result.best_move.expect("Should find a move");
    (mv.to_string(), result.score)
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    let (mv, score) = best("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 1);
    assert_eq!(mv, "e1e8", "Should find Qe8# (back rank mate)");
    assert_eq!(score, MATE_SCORE);
}

/// Test that Black's mates score negative
#[test]
fn finds_mate_in_one_for_black() {
    let (mv, score) = best("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2", 2);
    assert_eq!(mv, "d8h4");
    assert_eq!(score, -MATE_SCORE);
}

/// Test that the engine takes free material
#[test]
fn captures_hanging_queen() {
    let (mv, _) = best("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 2);
    assert_eq!(mv, "e4d5");
}

/// Test that the engine removes the attacker of its queen
#[test]
fn answers_threat_to_queen() {
    let (mv, score) = best("4k3/8/8/8/8/2p5/3Q4/4K3 w - - 0 1", 2);
    assert_eq!(mv, "d2c3");
    assert_eq!(score, 900);
}

#[test]
fn checkmated_root_has_no_move() {
    let position = Position::from_fen("7k/7Q/7K/8/8/8/8/8 b - - 0 1").unwrap();
    let result = find_best_move(
        &position,
        &SearchLimits::depth(3),
        &MaterialEvaluator,
        &AtomicBool::new(false),
    );
    assert_eq!(result.best_move, None);
    assert_eq!(result.depth, 0);
    assert_eq!(result.score, MATE_SCORE);
}

#[test]
fn stop_flag_returns_first_legal_move() {
    let position = Position::new();
    let stop = AtomicBool::new(true);
    let result = find_best_move(&position, &SearchLimits::depth(4), &MaterialEvaluator, &stop);
    assert_eq!(result.depth, 0);
    assert_eq!(result.best_move, position.legal_moves().get(0));
}

#[test]
fn node_limit_stops_deepening() {
    let position = Position::new();
    let limits = SearchLimits::depth(5).with_nodes(500);
    let result = find_best_move(&position, &limits, &MaterialEvaluator, &AtomicBool::new(false));
    assert!(result.depth < 5);
    assert!(result.best_move.is_some());
    assert!(result.nodes <= 501);
}

#[test]
fn time_limit_stops_deepening() {
    let position = Position::new();
    let limits = SearchLimits::depth(8).with_time(20);
    let start = Instant::now();
    let result = find_best_move(&position, &limits, &MaterialEvaluator, &AtomicBool::new(false));
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(result.depth < 8);
    assert!(result.best_move.is_some());
}

#[test]
fn constant_evaluator_keeps_first_move() {
    let position = Position::new();
    let flat = |_: &Position| 0;
    let result = find_best_move(&position, &SearchLimits::depth(2), &flat, &AtomicBool::new(false));
    assert_eq!(result.best_move, position.legal_moves().get(0));
    assert_eq!(result.score, 0);
}

#[test]
fn parallel_matches_sequential() {
    let stop = AtomicBool::new(false);
    for fen in [
        "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1",
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ] {
        let position = Position::from_fen(fen).unwrap();
        let limits = SearchLimits::depth(3);
        let sequential = find_best_move(&position, &limits, &MaterialEvaluator, &stop);
        let parallel = find_best_move_parallel(
            &position,
            &limits.with_threads(4),
            &MaterialEvaluator,
            &stop,
        );
        assert_eq!(parallel.best_move, sequential.best_move, "{fen}");
        assert_eq!(parallel.score, sequential.score, "{fen}");
        assert_eq!(parallel.depth, 3);
    }
}

#[test]
fn alpha_beta_matches_minimax_on_tactics() {
    let position = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
    for depth in 0..=3 {
        assert_eq!(
            search(&position, depth, true, &MaterialEvaluator),
            minimax(&position, depth, true, &MaterialEvaluator)
        );
    }
}

//! Parallel root search.
//!
//! Each iteration splits the root moves round-robin across scoped worker
//! threads. Workers clone their own child positions and score each root move
//! with a full window, so the merged result matches the sequential search.
//! They share only the stop flag, a global node counter and the result list.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;

use super::super::eval::Evaluator;
use super::super::{Move, Position};
use super::alpha_beta::score_root_move;
use super::{find_best_move, maximizing, SearchContext, SearchLimits, SearchResult};

/// Score of one root move computed by a worker
#[derive(Debug, Clone, Copy)]
struct RootScore {
    index: usize,
    mv: Move,
    score: i32,
}

/// Find the best move using `limits.threads` workers.
///
/// Falls back to [`find_best_move`] for a single thread. Ties between root
/// moves go to the one generated first, as in the sequential search.
pub fn find_best_move_parallel<E: Evaluator + ?Sized>(
    position: &Position,
    limits: &SearchLimits,
    eval: &E,
    stop: &AtomicBool,
) -> SearchResult {
    let num_threads = limits.threads.max(1);
    if num_threads == 1 {
        return find_best_move(position, limits, eval, stop);
    }

    let start = Instant::now();
    let deadline = limits.deadline(start);
    let total_nodes = AtomicU64::new(0);
    let mut result = super::fallback_result(position, eval);
    let root_moves = position.legal_moves();

    if result.best_move.is_none() {
        return result;
    }

    for depth in 1..=limits.max_depth {
        let scores: Mutex<Vec<RootScore>> = Mutex::new(Vec::with_capacity(root_moves.len()));
        let aborted = AtomicBool::new(false);

        thread::scope(|scope| {
            for worker_id in 0..num_threads {
                let (scores, aborted, total_nodes) = (&scores, &aborted, &total_nodes);
                let root_moves = &root_moves;
                scope.spawn(move || {
                    let mut ctx = SearchContext::new()
                        .with_stop(stop)
                        .with_shared_nodes(total_nodes)
                        .with_node_limit(limits.node_limit)
                        .with_deadline(deadline);
                    let assigned = root_moves
                        .iter()
                        .enumerate()
                        .skip(worker_id)
                        .step_by(num_threads);
                    for (index, &mv) in assigned {
                        let score = score_root_move(position, mv, depth, eval, &mut ctx);
                        if ctx.aborted() {
                            aborted.store(true, Ordering::Relaxed);
                            break;
                        }
                        scores.lock().push(RootScore { index, mv, score });
                    }
                    log::trace!(
                        "worker {worker_id} finished depth {depth} with {} nodes",
                        ctx.stats.nodes
                    );
                });
            }
        });

        if aborted.load(Ordering::Relaxed) {
            log::debug!("parallel search stopped during depth {depth}");
            break;
        }

        let Some(best) = pick_best(&scores.into_inner(), maximizing(position)) else {
            break;
        };
        result.best_move = Some(best.mv);
        result.score = best.score;
        result.depth = depth;
        log::debug!(
            "depth {depth} score {} nodes {} best {} ({} threads)",
            best.score,
            total_nodes.load(Ordering::Relaxed),
            best.mv,
            num_threads
        );
    }

    result.nodes = total_nodes.load(Ordering::Relaxed);
    result
}

/// Best score for the side to move, earliest generated move on ties.
fn pick_best(scores: &[RootScore], maximizing: bool) -> Option<RootScore> {
    scores.iter().copied().min_by_key(|s| {
        let key = if maximizing { -s.score } else { s.score };
        (key, s.index)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::eval::MaterialEvaluator;

    #[test]
    fn test_pick_best_prefers_first_on_ties() {
        let mv = Move::quiet(crate::board::Square::E1, crate::board::Square::E8);
        let scores = [
            RootScore { index: 2, mv, score: 5 },
            RootScore { index: 0, mv, score: 5 },
            RootScore { index: 1, mv, score: 3 },
        ];
        assert_eq!(pick_best(&scores, true).map(|s| s.index), Some(0));
        assert_eq!(pick_best(&scores, false).map(|s| s.index), Some(1));
        assert!(pick_best(&[], true).is_none());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let position =
            Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        let stop = AtomicBool::new(false);
        let sequential = find_best_move(&position, &SearchLimits::depth(2), &MaterialEvaluator, &stop);
        let parallel = find_best_move_parallel(
            &position,
            &SearchLimits::depth(2).with_threads(4),
            &MaterialEvaluator,
            &stop,
        );
        assert_eq!(parallel.best_move, sequential.best_move);
        assert_eq!(parallel.score, sequential.score);
        assert_eq!(parallel.depth, 2);
    }

    #[test]
    fn test_parallel_no_moves() {
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let stop = AtomicBool::new(false);
        let result = find_best_move_parallel(
            &position,
            &SearchLimits::depth(3).with_threads(2),
            &MaterialEvaluator,
            &stop,
        );
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }
}

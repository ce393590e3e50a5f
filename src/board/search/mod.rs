//! Minimax search with alpha-beta pruning.
//!
//! Features:
//! - Exhaustive minimax as a reference implementation
//! - Alpha-beta over the full legal move tree, children in generation order
//! - Iterative deepening with cooperative cancellation (stop flag, node and time budgets)
//! - Parallel root splitting over scoped worker threads
//!
//! Scores are from White's point of view; White maximizes.

mod alpha_beta;
pub mod smp;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::eval::Evaluator;
use super::{Color, Move, Position};

pub use alpha_beta::{alpha_beta, minimax, search};
pub use smp::find_best_move_parallel;

/// Score bound wider than any evaluation, mate scores included.
pub const SCORE_INF: i32 = 1_000_000;

/// Default iterative deepening horizon.
pub const DEFAULT_DEPTH: u32 = 4;

/// Budgets for a best-move search.
///
/// Zero node or time limits mean unlimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SearchLimits {
    /// Maximum depth to search
    pub max_depth: u32,
    /// Node limit (0 = unlimited)
    pub node_limit: u64,
    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,
    /// Worker threads for the parallel search
    pub threads: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_depth: DEFAULT_DEPTH,
            node_limit: 0,
            time_limit_ms: 0,
            threads: 1,
        }
    }
}

impl SearchLimits {
    /// Create a depth-limited search config
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchLimits {
            max_depth,
            ..Default::default()
        }
    }

    /// Set node limit
    #[must_use]
    pub fn with_nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Set time limit
    #[must_use]
    pub fn with_time(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    /// Set worker thread count (at least one)
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    fn deadline(&self, start: Instant) -> Option<Instant> {
        (self.time_limit_ms > 0).then(|| start + Duration::from_millis(self.time_limit_ms))
    }
}

/// Outcome of [`find_best_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found, `None` when the side to move has no move
    pub best_move: Option<Move>,
    /// Score of the best move, White's point of view
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u32,
    /// Nodes visited over all iterations
    pub nodes: u64,
}

/// Statistics tracked during search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        self.nodes = 0;
    }
}

/// Per-search bookkeeping threaded through the recursion.
///
/// Every node entry is counted and checked against the stop flag and the
/// node and time budgets. Once any of them trips, the context stays aborted
/// and the scores returned from then on are meaningless.
#[derive(Debug, Default)]
pub struct SearchContext<'a> {
    pub stats: SearchStats,
    stop: Option<&'a AtomicBool>,
    shared_nodes: Option<&'a AtomicU64>,
    node_limit: u64,
    deadline: Option<Instant>,
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    /// A context with no budgets.
    #[must_use]
    pub fn new() -> Self {
        SearchContext::default()
    }

    #[must_use]
    pub fn with_stop(mut self, stop: &'a AtomicBool) -> Self {
        self.stop = Some(stop);
        self
    }

    #[must_use]
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Count nodes against a counter shared with other workers.
    #[must_use]
    pub fn with_shared_nodes(mut self, counter: &'a AtomicU64) -> Self {
        self.shared_nodes = Some(counter);
        self
    }

    fn limits(limits: &SearchLimits, stop: &'a AtomicBool, start: Instant) -> Self {
        SearchContext::new()
            .with_stop(stop)
            .with_node_limit(limits.node_limit)
            .with_deadline(limits.deadline(start))
    }

    #[must_use]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Register a node visit; false once the search must unwind.
    pub(crate) fn enter(&mut self) -> bool {
        if self.aborted {
            return false;
        }
        self.stats.nodes += 1;
        let nodes = match self.shared_nodes {
            Some(counter) => counter.fetch_add(1, Ordering::Relaxed) + 1,
            None => self.stats.nodes,
        };

        if self.stop.is_some_and(|stop| stop.load(Ordering::Relaxed))
            || (self.node_limit > 0 && nodes > self.node_limit)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.aborted = true;
        }
        !self.aborted
    }
}

/// True when White is the maximizing side in `position`.
#[inline]
pub(crate) fn maximizing(position: &Position) -> bool {
    position.side_to_move() == Color::White
}

/// Find the best move with iterative deepening from depth 1 to `limits.max_depth`.
///
/// The result of an interrupted iteration is discarded. If not even the first
/// iteration completes, the first legal move is returned with depth 0.
///
/// # Example
/// ```
/// use std::sync::atomic::AtomicBool;
/// use mailbox_chess::board::{find_best_move, MaterialEvaluator, Position, SearchLimits};
///
/// let position = Position::from_fen("4k3/8/8/7r/8/8/8/3QK3 w - - 0 1").unwrap();
/// let result = find_best_move(&position, &SearchLimits::depth(2), &MaterialEvaluator, &AtomicBool::new(false));
/// assert_eq!(result.best_move.unwrap().to_string(), "d1h5");
/// ```
pub fn find_best_move<E: Evaluator + ?Sized>(
    position: &Position,
    limits: &SearchLimits,
    eval: &E,
    stop: &AtomicBool,
) -> SearchResult {
    let start = Instant::now();
    let mut ctx = SearchContext::limits(limits, stop, start);
    let mut result = fallback_result(position, eval);

    for depth in 1..=limits.max_depth {
        let outcome = alpha_beta::search_root(position, depth, eval, &mut ctx);
        if ctx.aborted() {
            log::debug!(
                "search stopped during depth {depth} after {} nodes",
                ctx.stats.nodes
            );
            break;
        }
        let Some((best_move, score)) = outcome else {
            break;
        };
        result.best_move = Some(best_move);
        result.score = score;
        result.depth = depth;
        log::debug!(
            "depth {depth} score {score} nodes {} best {best_move} ({} ms)",
            ctx.stats.nodes,
            start.elapsed().as_millis()
        );
    }

    result.nodes = ctx.stats.nodes;
    result
}

/// Result used before any iteration completes: first legal move, static score.
fn fallback_result<E: Evaluator + ?Sized>(position: &Position, eval: &E) -> SearchResult {
    let best_move = if eval.is_game_over(position) {
        None
    } else {
        position.legal_moves().get(0)
    };
    SearchResult {
        best_move,
        score: eval.evaluate(position),
        depth: 0,
        nodes: 0,
    }
}

use super::super::eval::Evaluator;
use super::super::{Move, Position};
use super::{maximizing, SearchContext, SCORE_INF};

/// Plain minimax over every legal move, no pruning.
///
/// Exists as the reference the pruned search is checked against.
pub fn minimax<E: Evaluator + ?Sized>(
    position: &Position,
    depth: u32,
    maximizing: bool,
    eval: &E,
) -> i32 {
    if depth == 0 || eval.is_game_over(position) {
        return eval.evaluate(position);
    }
    let scores = position
        .legal_moves()
        .into_iter()
        .map(|mv| minimax(&position.apply_move(mv), depth - 1, !maximizing, eval));
    let best = if maximizing {
        scores.max()
    } else {
        scores.min()
    };
    // no children: only reachable when the game-over predicate disagrees with the rules
    best.unwrap_or_else(|| eval.evaluate(position))
}

/// Minimax with alpha-beta pruning.
///
/// Children are visited in generation order and the loop stops as soon as
/// `beta <= alpha`. Returns the exact minimax value whenever it lies inside
/// the window.
pub fn alpha_beta<E: Evaluator + ?Sized>(
    position: &Position,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    eval: &E,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    if !ctx.enter() {
        return 0;
    }
    if depth == 0 || eval.is_game_over(position) {
        return eval.evaluate(position);
    }
    let moves = position.legal_moves();
    if moves.is_empty() {
        return eval.evaluate(position);
    }

    if maximizing {
        let mut best = -SCORE_INF;
        for &mv in &moves {
            let child = position.apply_move(mv);
            best = best.max(alpha_beta(&child, depth - 1, alpha, beta, false, eval, ctx));
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = SCORE_INF;
        for &mv in &moves {
            let child = position.apply_move(mv);
            best = best.min(alpha_beta(&child, depth - 1, alpha, beta, true, eval, ctx));
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Alpha-beta value of `position` with a full window.
///
/// # Example
/// ```
/// use mailbox_chess::board::{search, MaterialEvaluator, Position};
///
/// let position = Position::new();
/// assert_eq!(search(&position, 2, true, &MaterialEvaluator), 0);
/// ```
pub fn search<E: Evaluator + ?Sized>(
    position: &Position,
    depth: u32,
    maximizing: bool,
    eval: &E,
) -> i32 {
    let mut ctx = SearchContext::new();
    alpha_beta(position, depth, -SCORE_INF, SCORE_INF, maximizing, eval, &mut ctx)
}

/// Best root move and its score at a fixed depth, `None` at a terminal root.
///
/// Only a strictly better score replaces the current best, so the earliest
/// generated move wins ties.
pub(crate) fn search_root<E: Evaluator + ?Sized>(
    position: &Position,
    depth: u32,
    eval: &E,
    ctx: &mut SearchContext<'_>,
) -> Option<(Move, i32)> {
    if depth == 0 || !ctx.enter() || eval.is_game_over(position) {
        return None;
    }
    let max_side = maximizing(position);
    let (mut alpha, mut beta) = (-SCORE_INF, SCORE_INF);
    let mut best: Option<(Move, i32)> = None;

    for &mv in &position.legal_moves() {
        let child = position.apply_move(mv);
        let score = alpha_beta(&child, depth - 1, alpha, beta, !max_side, eval, ctx);
        if ctx.aborted() {
            return None;
        }
        let improves = best.map_or(true, |(_, best_score)| {
            if max_side {
                score > best_score
            } else {
                score < best_score
            }
        });
        if improves {
            best = Some((mv, score));
            if max_side {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }
    }
    best
}

/// Score every root move independently with a full window.
///
/// Used by the parallel search, where workers cannot share a window.
pub(crate) fn score_root_move<E: Evaluator + ?Sized>(
    position: &Position,
    mv: Move,
    depth: u32,
    eval: &E,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    let child = position.apply_move(mv);
    alpha_beta(
        &child,
        depth.saturating_sub(1),
        -SCORE_INF,
        SCORE_INF,
        !maximizing(position),
        eval,
        ctx,
    )
}

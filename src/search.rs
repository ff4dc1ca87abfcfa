//! Depth-limited best-move search.
//!
//! The search is a plain maximisation over the mover's own seed count;
//! it does not model the opponent. Subtrees are released as soon as their
//! score is known, so only one path of expanded nodes is alive at a time.
//!
//! TODO: replace with negamax and alpha-beta pruning once the evaluation
//! accounts for the opponent's replies.

use log::debug;

use crate::constants::STORE;
use crate::error::BaoError;
use crate::rules::Rules;
use crate::state::Side;
use crate::tree::Node;

/// Static score of `node` from `perspective`.
///
/// A node whose mover has no legal move (no children) scores 0. Otherwise
/// it is the seeds the mover has on the board, negated when the mover is
/// not `perspective`. Expects the node to have been grown.
pub fn evaluate(node: &Node, perspective: Side) -> i32 {
    if node.children.is_empty() {
        return 0;
    }
    let mover = node.state.player;
    let score: i32 = node.state.board[mover.index()][..STORE]
        .iter()
        .map(|&s| s as i32)
        .sum();
    if mover == perspective { score } else { -score }
}

/// Best score reachable `depth` plies below `node`, never below 0.
///
/// Grows `node`, recurses into every child and prunes the children once
/// scored, so `node` has no children when this returns with `depth > 0`.
pub fn best_score(
    perspective: Side,
    node: &mut Node,
    rules: &Rules,
    depth: usize,
) -> Result<i32, BaoError> {
    node.grow(rules)?;
    if depth == 0 {
        return Ok(evaluate(node, perspective));
    }

    let mut best = 0;
    for child in &mut node.children {
        let score = best_score(perspective, child, rules, depth - 1)?;
        best = best.max(score);
    }
    node.prune();
    Ok(best)
}

/// Index of the child of `node` with the best score at `depth`.
///
/// Ties are settled by a coin flip between the current best and the
/// challenger, so later candidates are not equally likely to win.
/// Returns `None` when the mover has no legal move.
pub fn best_branch(
    node: &mut Node,
    rules: &Rules,
    depth: usize,
    rng: &mut fastrand::Rng,
) -> Result<Option<usize>, BaoError> {
    node.grow(rules)?;
    let perspective = node.state.player;

    let mut best: Option<(usize, i32)> = None;
    for (i, child) in node.children.iter_mut().enumerate() {
        let score = best_score(perspective, child, rules, depth)?;
        best = match best {
            Some((_, max)) if score > max => Some((i, score)),
            Some((_, max)) if score == max && !rng.bool() => Some((i, score)),
            None => Some((i, score)),
            keep => keep,
        };
    }

    if let Some((i, score)) = best {
        debug!("best branch {i} scores {score} at depth {depth}");
    }
    Ok(best.map(|(i, _)| i))
}

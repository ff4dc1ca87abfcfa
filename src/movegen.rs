//! Legal move enumeration.
//!
//! Moves are grouped into categories that are tried in a fixed priority
//! order; the first category that yields anything is the answer. Finding
//! a sowing category marks the turn as a plain sow (takata), which later
//! forbids captures while the move executes.
//!
//! First stage (store non-empty):
//! 1. captures from any front hole
//! 2. sows from front holes, skipping the house while it is intact
//! 3. sows from front holes, always skipping the house
//! 4. the special house move
//!
//! Second stage (store empty):
//! 1. captures from front holes whose last seed lands on a capture
//! 2. sows from front holes holding more than one seed, respecting the trap
//! 3. the trap-cancel move, when the trap blocks every other front hole
//! 4. the same sows from back holes, once the front row has none

use std::ops::RangeInclusive;

use crate::constants::*;
use crate::rules::Rules;
use crate::state::{BoardState, Direction, Move};

/// Predicate deciding whether `(hole, dir)` is playable in some category.
type MoveTest = fn(&BoardState, &Rules, Hole, Direction) -> bool;

const FRONT: RangeInclusive<Hole> = FRONT_FIRST..=FRONT_LAST;
const BACK: RangeInclusive<Hole> = BACK_FIRST..=BACK_LAST;

fn first_stage_capture(state: &BoardState, _rules: &Rules, hole: Hole, _dir: Direction) -> bool {
    state.can_capture(hole)
}

fn first_stage_sow(state: &BoardState, _rules: &Rules, hole: Hole, _dir: Direction) -> bool {
    let p = state.player;
    state.seeds(p, hole) > 0 && !(hole == HOUSE && state.house_intact(p))
}

fn first_stage_sow_skip_house(
    state: &BoardState,
    _rules: &Rules,
    hole: Hole,
    _dir: Direction,
) -> bool {
    state.seeds(state.player, hole) > 0 && hole != HOUSE
}

fn first_stage_house_special(state: &BoardState, rules: &Rules, hole: Hole, _dir: Direction) -> bool {
    let p = state.player;
    let seeds = state.seeds(p, hole);
    hole == HOUSE && state.house_intact(p) && seeds > 0 && seeds >= rules.min_house_special
}

/// A second-stage capture must start from a small enough front pile whose
/// last seed lands on a hole that captures.
fn second_stage_capture(state: &BoardState, rules: &Rules, hole: Hole, dir: Direction) -> bool {
    let seeds = state.seeds(state.player, hole);
    if !in_front(hole) || seeds == 0 || seeds > rules.max_capture_seeds {
        return false;
    }
    state.can_capture(dir.advance(hole, seeds))
}

fn second_stage_sow(state: &BoardState, rules: &Rules, hole: Hole, _dir: Direction) -> bool {
    let p = state.player;
    if state.seeds(p, hole) <= 1 {
        return false;
    }
    if rules.has_trap && state.trapped == Some(hole) {
        // An intact house is exempt from the trap.
        return hole == HOUSE && state.house_intact(p);
    }
    true
}

fn second_stage_trap_cancel(state: &BoardState, _rules: &Rules, hole: Hole, _dir: Direction) -> bool {
    let p = state.player;
    if state.trapped != Some(hole) || state.seeds(p, hole) <= 1 {
        return false;
    }
    FRONT
        .filter(|&h| h != hole)
        .all(|h| state.seeds(p, h) <= 1)
}

#[inline]
fn in_front(hole: Hole) -> bool {
    FRONT.contains(&hole)
}

/// Collect every `(hole, dir)` in `holes` accepted by `test`, left before
/// right, stopping at [`MAX_TRANSITIONS`] entries.
fn collect(state: &BoardState, rules: &Rules, holes: RangeInclusive<Hole>, test: MoveTest) -> Vec<Move> {
    let mut moves = Vec::new();
    for hole in holes {
        for dir in Direction::BOTH {
            if test(state, rules, hole, dir) {
                if moves.len() == MAX_TRANSITIONS {
                    return moves;
                }
                moves.push(Move::new(hole, dir));
            }
        }
    }
    moves
}

/// Enumerate the legal moves of the player to move.
///
/// Sets `state.plain_sow` to reflect the category that was accepted.
/// An empty result means the player has no legal move and has lost.
pub fn legal_moves(state: &mut BoardState, rules: &Rules) -> Vec<Move> {
    let categories: [(RangeInclusive<Hole>, MoveTest); 4] = if state.in_first_stage(state.player) {
        [
            (FRONT, first_stage_capture),
            (FRONT, first_stage_sow),
            (FRONT, first_stage_sow_skip_house),
            (HOUSE..=HOUSE, first_stage_house_special),
        ]
    } else {
        let trapped = state.trapped.unwrap_or(HOUSE);
        [
            (FRONT, second_stage_capture),
            (FRONT, second_stage_sow),
            (trapped..=trapped, second_stage_trap_cancel),
            (BACK, second_stage_sow),
        ]
    };

    for (i, (holes, test)) in categories.into_iter().enumerate() {
        // Everything after the capture category is a plain sow.
        state.plain_sow = i > 0;
        let moves = collect(state, rules, holes, test);
        if !moves.is_empty() {
            return moves;
        }
    }
    state.plain_sow = false;
    Vec::new()
}

/// Hole blocked by the single-capture trap after the player to move has
/// sown: the one front hole from which that player threatens a capture.
///
/// Returns `None` when no hole or more than one hole threatens.
pub fn find_trap(state: &BoardState, rules: &Rules) -> Option<Hole> {
    let threats = collect(state, rules, FRONT, second_stage_capture);
    let first = threats.first()?.hole;
    threats.iter().all(|m| m.hole == first).then_some(first)
}

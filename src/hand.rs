//! Step-by-step move execution.
//!
//! A [`Hand`] walks the board lifting and sowing seeds. Each call to
//! [`Hand::step`] runs at most the requested number of steps, so a
//! presentation layer can animate a move hole by hole and the tree builder
//! can bound moves that would otherwise sow forever.
//!
//! One step is either:
//! - with an empty hand: capture from the facing hole, or lift the current
//!   hole, or finish the move;
//! - with seeds in hand: move one hole on and drop a seed. Right after a
//!   capture the hand instead jumps to the kichwa at the end of the front
//!   row it is heading towards.

use log::trace;

use crate::constants::*;
use crate::error::BaoError;
use crate::rules::Rules;
use crate::state::{BoardState, Direction, Move, Side, in_capture_range, mirror};

/// Outcome of running a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// The move is still in progress.
    Continuing,
    /// Stopped before lifting the intact house during a capture turn.
    /// Call [`Hand::resume`] to lift it anyway.
    Halted,
    /// The move is fully resolved.
    Done,
    /// The step budget ran out first; the move may never end.
    NotDone,
    /// The executor reached a state its rules do not cover.
    Error,
}

impl ExecStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ExecStatus::Done | ExecStatus::Error)
    }
}

/// The mover's hand during execution of one move.
pub struct Hand<'a> {
    state: &'a mut BoardState,
    rules: &'a Rules,
    /// Side of the board the hand is over. Differs from `state.player`
    /// only between a capture and the following sow.
    side: Side,
    hole: Hole,
    seeds: u32,
    dir: Direction,
    steps: usize,
    status: ExecStatus,
}

impl<'a> Hand<'a> {
    /// Begin executing `mv` on `state`.
    ///
    /// In the first stage a seed is entered from the store into the start
    /// hole; in the second stage the start hole is lifted.
    pub fn start(state: &'a mut BoardState, rules: &'a Rules, mv: &Move) -> Result<Self, BaoError> {
        if mv.hole > BACK_LAST {
            return Err(BaoError::InvalidHole(mv.hole));
        }
        let side = state.player;
        let mut hand = Hand {
            state,
            rules,
            side,
            hole: mv.hole,
            seeds: 0,
            dir: mv.dir,
            steps: 0,
            status: ExecStatus::Continuing,
        };

        if hand.state.in_first_stage(side) {
            *hand.state.seeds_mut(side, STORE) -= 1;
            *hand.state.seeds_mut(side, mv.hole) += 1;
            if hand.can_play_house_special() {
                // Sow one onto the house, then take two back out.
                *hand.state.seeds_mut(side, HOUSE) -= 2;
                hand.seeds = 2;
            }
        } else {
            // A second-stage capture ends the life of both houses.
            if !hand.state.plain_sow {
                hand.state.house_intact = [false; NPLAYERS];
            }
            hand.lift();
        }
        trace!("start {mv} for {side}: {} seeds in hand", hand.seeds);
        Ok(hand)
    }

    fn can_play_house_special(&self) -> bool {
        self.state.plain_sow
            && self.hole == HOUSE
            && self.state.house_intact(self.side)
            && self.state.seeds(self.side, HOUSE) >= self.rules.min_house_special.max(2)
    }

    /// Run up to `steps` steps.
    ///
    /// Returns [`ExecStatus::NotDone`] if the budget ran out before the
    /// move stopped. Calling again continues where the hand left off.
    pub fn step(&mut self, steps: usize) -> ExecStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        for _ in 0..steps {
            self.status = self.advance();
            if self.status != ExecStatus::Continuing {
                return self.status;
            }
            self.steps += 1;
        }
        ExecStatus::NotDone
    }

    /// Lift an intact house the hand halted on.
    pub fn resume(&mut self) {
        self.state.house_intact[self.side.index()] = false;
        self.status = ExecStatus::Continuing;
    }

    /// Release the hand, returning the number of steps it took.
    pub fn end(self) -> usize {
        trace!("end after {} steps: {:?}", self.steps, self.status);
        self.steps
    }

    /// The state being mutated.
    pub fn state(&self) -> &BoardState {
        &*self.state
    }

    pub fn status(&self) -> ExecStatus {
        self.status
    }

    /// Completed steps so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Where the hand is and how many seeds it holds.
    pub fn position(&self) -> (Side, Hole, u32) {
        (self.side, self.hole, self.seeds)
    }

    fn advance(&mut self) -> ExecStatus {
        if self.seeds > 0 {
            if self.side != self.state.player {
                // Just captured: bring the seeds home and start at a kichwa.
                self.switch_side();
                self.reset();
            } else {
                self.hole = self.dir.advance(self.hole, 1);
            }
            self.sow();
            return ExecStatus::Continuing;
        }

        if self.side != self.state.player {
            return ExecStatus::Error;
        }

        if self.can_switch_side() {
            self.switch_side();
            self.lift();
            if self.hole == HOUSE && self.state.house_intact(self.side) {
                self.state.house_intact[self.side.index()] = false;
            }
            trace!("captured {} seeds from {} hole {}", self.seeds, self.side, self.hole);
            return ExecStatus::Continuing;
        }

        if self.state.seeds(self.side, self.hole) <= 1 {
            return ExecStatus::Done;
        }

        if self.hole == HOUSE && self.state.house_intact(self.side) {
            if self.state.in_first_stage(self.side) {
                return if self.state.plain_sow {
                    ExecStatus::Done
                } else {
                    ExecStatus::Halted
                };
            }
            self.lift();
            self.state.house_intact[self.side.index()] = false;
        } else if !self.state.in_first_stage(self.side)
            && self.state.plain_sow
            && self.state.trapped == Some(self.hole)
            && self.rules.has_trap
        {
            return ExecStatus::Done;
        } else {
            self.lift();
        }
        ExecStatus::Continuing
    }

    fn can_switch_side(&self) -> bool {
        in_capture_range(self.hole)
            && !self.state.plain_sow
            && self.state.seeds(self.side, self.hole) > 1
            && self.state.seeds(self.side.opponent(), mirror(self.hole)) > 0
    }

    fn switch_side(&mut self) {
        self.side = self.side.opponent();
        self.hole = mirror(self.hole);
    }

    fn lift(&mut self) {
        let pile = self.state.seeds_mut(self.side, self.hole);
        self.seeds += *pile;
        *pile = 0;
    }

    fn sow(&mut self) {
        *self.state.seeds_mut(self.side, self.hole) += 1;
        self.seeds -= 1;
    }

    /// Re-anchor after a capture: kimbi and kichwa captures pick their own
    /// end of the row, anything else keeps the current direction.
    fn reset(&mut self) {
        if self.hole <= LEFT_KIMBI {
            self.hole = FRONT_FIRST;
            self.dir = Direction::Right;
        } else if self.hole >= RIGHT_KIMBI {
            self.hole = FRONT_LAST;
            self.dir = Direction::Left;
        } else {
            self.hole = match self.dir {
                Direction::Right => FRONT_FIRST,
                Direction::Left => FRONT_LAST,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Variant;

    fn second_stage() -> (BoardState, Rules) {
        let rules = Variant::Kujifunza.rules();
        let mut state = BoardState::new(&rules);
        state.board = [[0; NHOLES]; NPLAYERS];
        (state, rules)
    }

    #[test]
    fn test_plain_sow_second_stage() {
        let (mut state, rules) = second_stage();
        *state.seeds_mut(Side::South, 2) = 3;
        state.plain_sow = true;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(2, Direction::Right)).unwrap();
        assert_eq!(hand.position(), (Side::South, 2, 3));
        assert_eq!(hand.step(10), ExecStatus::Done);
        assert_eq!(hand.steps_taken(), 3);
        hand.end();

        assert_eq!(state.seeds(Side::South, 2), 0);
        assert_eq!(state.seeds(Side::South, 3), 1);
        assert_eq!(state.seeds(Side::South, 4), 1);
        assert_eq!(state.seeds(Side::South, 5), 1);
    }

    #[test]
    fn test_relay_sowing_lifts_again() {
        let (mut state, rules) = second_stage();
        *state.seeds_mut(Side::South, 14) = 2;
        *state.seeds_mut(Side::South, 0) = 1;
        state.plain_sow = true;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(14, Direction::Right)).unwrap();
        // 14 -> 15, 0 (now 2, lifted) -> 1, 2.
        assert_eq!(hand.step(10), ExecStatus::Done);
        hand.end();
        assert_eq!(state.seeds(Side::South, 15), 1);
        assert_eq!(state.seeds(Side::South, 0), 0);
        assert_eq!(state.seeds(Side::South, 1), 1);
        assert_eq!(state.seeds(Side::South, 2), 1);
    }

    #[test]
    fn test_step_budget_is_resumable() {
        let (mut state, rules) = second_stage();
        *state.seeds_mut(Side::South, 2) = 3;
        state.plain_sow = true;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(2, Direction::Left)).unwrap();
        assert_eq!(hand.step(1), ExecStatus::NotDone);
        assert_eq!(hand.position(), (Side::South, 1, 2));
        assert_eq!(hand.step(1), ExecStatus::NotDone);
        assert_eq!(hand.step(5), ExecStatus::Done);
        assert_eq!(hand.step(5), ExecStatus::Done);
        assert_eq!(hand.end(), 3);
        assert_eq!(state.seeds(Side::South, 15), 1);
    }

    #[test]
    fn test_capture_resets_to_kichwa() {
        let (mut state, rules) = second_stage();
        // South 2 sows right, last seed on 4 which then holds 2.
        *state.seeds_mut(Side::South, 2) = 2;
        *state.seeds_mut(Side::South, 4) = 1;
        *state.seeds_mut(Side::North, 3) = 2;
        let total = state.total_seeds();

        let mut hand = Hand::start(&mut state, &rules, &Move::new(2, Direction::Right)).unwrap();
        assert_eq!(hand.step(2), ExecStatus::NotDone);
        // Capture North 3 (facing South 4).
        assert_eq!(hand.step(1), ExecStatus::NotDone);
        assert_eq!(hand.position(), (Side::North, 3, 2));
        // Sowing right from a middle hole restarts at the left kichwa.
        assert_eq!(hand.step(1), ExecStatus::NotDone);
        assert_eq!(hand.position(), (Side::South, FRONT_FIRST, 1));
        assert_eq!(hand.step(10), ExecStatus::Done);
        hand.end();

        assert_eq!(state.seeds(Side::North, 3), 0);
        assert_eq!(state.seeds(Side::South, 0), 1);
        assert_eq!(state.seeds(Side::South, 1), 1);
        assert_eq!(state.seeds(Side::South, 4), 2);
        assert_eq!(state.total_seeds(), total);
    }

    #[test]
    fn test_kimbi_capture_picks_direction() {
        let (mut state, rules) = second_stage();
        // Last seed lands on South 6 (a kimbi), capturing North 1.
        *state.seeds_mut(Side::South, 5) = 1;
        *state.seeds_mut(Side::South, 6) = 1;
        *state.seeds_mut(Side::North, 1) = 1;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(5, Direction::Right)).unwrap();
        assert_eq!(hand.step(3), ExecStatus::NotDone);
        assert_eq!(hand.position(), (Side::South, FRONT_LAST, 0));
        assert_eq!(hand.step(10), ExecStatus::Done);
        hand.end();
        assert_eq!(state.seeds(Side::South, FRONT_LAST), 1);
        assert_eq!(state.seeds(Side::South, 6), 2);
    }

    #[test]
    fn test_plain_sow_never_captures() {
        let (mut state, rules) = second_stage();
        *state.seeds_mut(Side::South, 2) = 2;
        *state.seeds_mut(Side::South, 4) = 1;
        *state.seeds_mut(Side::North, 3) = 2;
        state.plain_sow = true;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(2, Direction::Right)).unwrap();
        // Lands on 4 (two seeds), lifts and sows on instead of capturing.
        assert_eq!(hand.step(10), ExecStatus::Done);
        hand.end();
        assert_eq!(state.seeds(Side::North, 3), 2);
        assert_eq!(state.seeds(Side::South, 4), 0);
        assert_eq!(state.seeds(Side::South, 5), 1);
        assert_eq!(state.seeds(Side::South, 6), 1);
    }

    #[test]
    fn test_trapped_hole_is_not_relayed() {
        let (mut state, rules) = second_stage();
        *state.seeds_mut(Side::South, 2) = 2;
        *state.seeds_mut(Side::South, 4) = 1;
        state.plain_sow = true;
        state.trapped = Some(4);

        let mut hand = Hand::start(&mut state, &rules, &Move::new(2, Direction::Right)).unwrap();
        assert_eq!(hand.step(10), ExecStatus::Done);
        hand.end();
        assert_eq!(state.seeds(Side::South, 4), 2);
    }

    #[test]
    fn test_first_stage_enters_store_seed() {
        let rules = Variant::Kiswahili.rules();
        let mut state = BoardState::new(&rules);
        state.plain_sow = true;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(5, Direction::Left)).unwrap();
        // 5 now holds 3: lift and sow 4 (house), 3, 2.
        assert_eq!(hand.position(), (Side::South, 5, 0));
        assert_eq!(hand.step(10), ExecStatus::Done);
        hand.end();
        assert_eq!(state.seeds(Side::South, STORE), 19);
        assert_eq!(state.seeds(Side::South, 5), 0);
        assert_eq!(state.seeds(Side::South, HOUSE), 9);
        assert_eq!(state.seeds(Side::South, 3), 1);
        assert_eq!(state.seeds(Side::South, 2), 1);
        assert_eq!(state.total_seeds(), 64);
    }

    #[test]
    fn test_house_special_lifts_two() {
        let rules = Variant::Kiswahili.rules();
        let mut state = BoardState::new(&rules);
        state.plain_sow = true;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(HOUSE, Direction::Right)).unwrap();
        assert_eq!(hand.position(), (Side::South, HOUSE, 2));
        // Sow 5 and 6, lift the three on 6, then sow 7, 8, 9.
        assert_eq!(hand.step(20), ExecStatus::Done);
        hand.end();
        assert_eq!(state.seeds(Side::South, STORE), 19);
        assert_eq!(state.seeds(Side::South, HOUSE), 7);
        assert!(state.house_intact(Side::South));
        assert_eq!(state.seeds(Side::South, 5), 3);
        assert_eq!(state.seeds(Side::South, 6), 0);
        assert_eq!(state.seeds(Side::South, 7), 1);
        assert_eq!(state.seeds(Side::South, 8), 1);
        assert_eq!(state.seeds(Side::South, 9), 1);
        assert_eq!(state.total_seeds(), 64);
    }

    #[test]
    fn test_second_stage_capture_ends_both_houses() {
        let (mut state, rules) = second_stage();
        *state.seeds_mut(Side::South, 2) = 2;
        *state.seeds_mut(Side::South, 4) = 1;
        *state.seeds_mut(Side::North, 3) = 2;
        state.house_intact = [true; NPLAYERS];

        let hand = Hand::start(&mut state, &rules, &Move::new(2, Direction::Right)).unwrap();
        assert!(!hand.state().house_intact(Side::South));
        assert!(!hand.state().house_intact(Side::North));
        hand.end();
    }

    #[test]
    fn test_capturing_opponent_house_ends_it() {
        let rules = Variant::Kiswahili.rules();
        let mut state = BoardState::new(&rules);
        // South 3 faces North's house.
        *state.seeds_mut(Side::South, 3) = 1;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(3, Direction::Left)).unwrap();
        assert_eq!(hand.step(1), ExecStatus::NotDone);
        assert_eq!(hand.position(), (Side::North, HOUSE, 8));
        assert!(!hand.state().house_intact(Side::North));
        assert!(hand.state().house_intact(Side::South));
        assert_eq!(hand.step(rules.max_steps), ExecStatus::Done);
        hand.end();
        assert_eq!(state.seeds(Side::North, HOUSE), 0);
    }

    #[test]
    fn test_second_stage_lifts_intact_house() {
        let (mut state, rules) = second_stage();
        *state.seeds_mut(Side::South, 2) = 2;
        *state.seeds_mut(Side::South, HOUSE) = 1;
        state.house_intact = [true; NPLAYERS];
        state.plain_sow = true;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(2, Direction::Right)).unwrap();
        // 3, then the house (now 2) is lifted and sown onto 5, 6.
        assert_eq!(hand.step(10), ExecStatus::Done);
        hand.end();
        assert!(!state.house_intact(Side::South));
        assert!(state.house_intact(Side::North));
        assert_eq!(state.seeds(Side::South, HOUSE), 0);
        assert_eq!(state.seeds(Side::South, 5), 1);
        assert_eq!(state.seeds(Side::South, 6), 1);
    }

    #[test]
    fn test_first_stage_sow_stops_on_house() {
        let rules = Variant::Kiswahili.rules();
        let mut state = BoardState::new(&rules);
        *state.seeds_mut(Side::South, 6) = 1;
        state.plain_sow = true;

        let mut hand = Hand::start(&mut state, &rules, &Move::new(6, Direction::Left)).unwrap();
        // 6 holds 2: lift and sow 5, then the house, which is left alone.
        assert_eq!(hand.step(10), ExecStatus::Done);
        assert_eq!(hand.steps_taken(), 3);
        hand.end();
        assert_eq!(state.seeds(Side::South, HOUSE), 9);
        assert!(state.house_intact(Side::South));
        assert_eq!(state.seeds(Side::South, 5), 3);
    }

    #[test]
    fn test_invalid_hole() {
        let (mut state, rules) = second_stage();
        let result = Hand::start(&mut state, &rules, &Move::new(STORE, Direction::Left));
        assert_eq!(result.err(), Some(BaoError::InvalidHole(STORE)));
    }
}

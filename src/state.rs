//! Board state, sides, directions and moves.
//!
//! Both sides are stored from their own point of view: hole 0 is always
//! the owner's left kichwa. The two front rows meet along the capture
//! boundary, so front hole `h` of one side faces [`mirror`]`(h)` of the
//! other.

use std::fmt;

use crate::constants::*;
use crate::rules::Rules;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    North,
    South,
}

impl Side {
    /// Row index into [`BoardState::board`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::North => 0,
            Side::South => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::North => f.write_str("N"),
            Side::South => f.write_str("S"),
        }
    }
}

/// Sowing direction along the ring of board holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards lower hole indices (anti-clockwise).
    Left,
    /// Towards higher hole indices (clockwise).
    Right,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Left, Direction::Right];

    /// Hole reached after `n` steps from `hole`, wrapping around the ring.
    #[inline]
    pub fn advance(self, hole: Hole, n: u32) -> Hole {
        let n = n as usize % RING;
        match self {
            Direction::Right => (hole + n) % RING,
            Direction::Left => (hole + RING - n) % RING,
        }
    }
}

/// Hole on the opposing side facing `hole` across the capture boundary.
///
/// Front holes reflect onto front holes, back holes onto back holes.
#[inline]
pub fn mirror(hole: Hole) -> Hole {
    if hole <= FRONT_LAST {
        FRONT_LAST - hole
    } else {
        STORE + FRONT_LAST - hole
    }
}

/// True for holes in the front row, the only ones that capture.
#[inline]
pub fn in_capture_range(hole: Hole) -> bool {
    hole <= FRONT_LAST
}

/// A move: start hole, initial direction and whether the outcome is the
/// one paused on the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub hole: Hole,
    pub dir: Direction,
    /// The move stopped on the intact house instead of lifting it.
    pub paused: bool,
}

impl Move {
    pub fn new(hole: Hole, dir: Direction) -> Self {
        Self {
            hole,
            dir,
            paused: false,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.dir {
            Direction::Right => "CK",
            Direction::Left => "ANTCK",
        };
        write!(f, "{}-{dir}", self.hole)?;
        if self.paused {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// Snapshot of the board between (or during) moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Seeds per hole, indexed by [`Side::index`] then hole.
    pub board: [[u32; NHOLES]; NPLAYERS],
    /// Whether each side's house is still intact.
    pub house_intact: [bool; NPLAYERS],
    /// The accepted move category this turn is a plain sow (takata), not a capture.
    pub plain_sow: bool,
    /// Hole blocked by the single-capture trap, if any.
    pub trapped: Option<Hole>,
    /// Side to move.
    pub player: Side,
}

impl BoardState {
    /// Initial position for `rules`, South to move.
    pub fn new(rules: &Rules) -> Self {
        Self {
            board: [rules.layout; NPLAYERS],
            house_intact: [rules.has_house; NPLAYERS],
            plain_sow: false,
            trapped: None,
            player: Side::South,
        }
    }

    #[inline]
    pub fn seeds(&self, side: Side, hole: Hole) -> u32 {
        self.board[side.index()][hole]
    }

    #[inline]
    pub fn seeds_mut(&mut self, side: Side, hole: Hole) -> &mut u32 {
        &mut self.board[side.index()][hole]
    }

    #[inline]
    pub fn house_intact(&self, side: Side) -> bool {
        self.house_intact[side.index()]
    }

    /// A side plays its first stage (namua) while its store holds seeds.
    #[inline]
    pub fn in_first_stage(&self, side: Side) -> bool {
        self.seeds(side, STORE) > 0
    }

    /// Seeds `side` owns on the board, store excluded.
    pub fn side_seeds(&self, side: Side) -> u32 {
        self.board[side.index()][..STORE].iter().sum()
    }

    /// Every seed in the game, stores included.
    pub fn total_seeds(&self) -> u32 {
        self.board.iter().flatten().sum()
    }

    /// Can the player to move capture starting from front hole `hole`?
    pub fn can_capture(&self, hole: Hole) -> bool {
        in_capture_range(hole)
            && self.seeds(self.player, hole) > 0
            && self.seeds(self.player.opponent(), mirror(hole)) > 0
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // North is drawn from South's point of view: its front row faces
        // South's front row and its left kichwa sits above South's right one.
        let north = &self.board[Side::North.index()];
        let south = &self.board[Side::South.index()];
        let row = |holes: &mut dyn Iterator<Item = u32>| -> String {
            holes
                .map(|s| format!("{s:>2}"))
                .collect::<Vec<_>>()
                .join(" ")
        };

        writeln!(f, "N  {}   store {}", row(&mut (BACK_FIRST..=BACK_LAST).map(|h| north[h])), north[STORE])?;
        writeln!(f, "N  {}", row(&mut (FRONT_FIRST..=FRONT_LAST).rev().map(|h| north[h])))?;
        writeln!(f, "S  {}", row(&mut (FRONT_FIRST..=FRONT_LAST).map(|h| south[h])))?;
        writeln!(f, "S  {}   store {}", row(&mut (BACK_FIRST..=BACK_LAST).rev().map(|h| south[h])), south[STORE])?;

        let flag = |b: bool| if b { "intact" } else { "-" };
        write!(
            f,
            "house N:{} S:{}  {}  trapped:{}  to move:{}",
            flag(self.house_intact(Side::North)),
            flag(self.house_intact(Side::South)),
            if self.plain_sow { "takata" } else { "capture" },
            self.trapped.map_or_else(|| "-".to_string(), |h| h.to_string()),
            self.player
        )
    }
}

//! Board geometry and engine limits.
//!
//! Each side owns 17 holes laid out in a single array:
//!
//! ```text
//!  back row:  15 14 13 12 11 10  9  8
//! front row:   0  1  2  3  4  5  6  7      store: 16
//! ```
//!
//! Sowing walks the 16 board holes as a ring (0 -> 7 -> 8 -> 15 -> 0).
//! The front rows of both sides face each other; front hole `h` of one
//! side faces front hole `7 - h` of the other.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of players in a game.
pub const NPLAYERS: usize = 2;

/// Number of holes owned by each side, including the store.
pub const NHOLES: usize = 17;

/// Number of holes seeds are sown around (front and back rows).
pub const RING: usize = 16;

/// Index of a hole on one side of the board.
pub type Hole = usize;

/// Left kichwa (first hole of the front row).
pub const FRONT_FIRST: Hole = 0;

/// Left kimbi.
pub const LEFT_KIMBI: Hole = 1;

/// The house (nyumba), a front hole with special lifting rules while intact.
pub const HOUSE: Hole = 4;

/// Right kimbi.
pub const RIGHT_KIMBI: Hole = 6;

/// Right kichwa (last hole of the front row).
pub const FRONT_LAST: Hole = 7;

/// First hole of the back row (behind the right kichwa).
pub const BACK_FIRST: Hole = 8;

/// Last hole of the back row (behind the left kichwa).
pub const BACK_LAST: Hole = 15;

/// Off-board store of seeds not yet entered. A side plays its first stage
/// (namua) while its store is non-empty.
pub const STORE: Hole = 16;

// =============================================================================
// Engine Limits
// =============================================================================

/// Maximum number of candidate moves accepted from a single enumeration.
pub const MAX_TRANSITIONS: usize = 20;

/// Default bound on executor steps before a move is deemed perpetual.
pub const DEFAULT_MAX_STEPS: usize = 50;

/// Default search depth used by the binary.
pub const DEFAULT_DEPTH: usize = 3;

//! Errors reported by the engine.

use crate::constants::Hole;
use crate::state::Side;

/// Failure of a tree, cursor or executor operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaoError {
    /// Cursor shift to a child index that does not exist
    InvalidBranch { index: usize, len: usize },
    /// Cursor unshift from the root
    NoParent,
    /// Move started from a hole outside the sowing ring
    InvalidHole(Hole),
    /// Executor reached a state its rules do not cover
    UndefinedExecution { side: Side, hole: Hole },
}

impl std::fmt::Display for BaoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaoError::InvalidBranch { index, len } => {
                write!(f, "invalid branch {index}: node has {len} children")
            }
            BaoError::NoParent => write!(f, "node has no parent"),
            BaoError::InvalidHole(hole) => write!(f, "hole {hole} cannot start a move"),
            BaoError::UndefinedExecution { side, hole } => {
                write!(f, "undefined execution condition at {side} hole {hole}")
            }
        }
    }
}

impl std::error::Error for BaoError {}

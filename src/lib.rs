//! Bao engine: move generation, move execution and search for the East
//! African mancala game bao.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and engine limits
//! - [`rules`] - Regional rule sets and the named presets
//! - [`state`] - Board state, sides, directions and moves
//! - [`movegen`] - Legal move enumeration by stage and category
//! - [`hand`] - Resumable step-by-step move execution
//! - [`tree`] - Game tree growth, pruning and cursor navigation
//! - [`search`] - Depth-limited best-move search
//! - [`session`] - Text command loop for interactive play
//! - [`error`] - Error type shared by the modules above
//!
//! ## Example
//!
//! ```
//! use bao_engine::rules::Variant;
//! use bao_engine::search::best_branch;
//! use bao_engine::tree::GameTree;
//!
//! let rules = Variant::Kiswahili.rules();
//! let mut tree = GameTree::new(&rules);
//!
//! // Let the engine pick South's opening move and play it
//! let mut rng = fastrand::Rng::with_seed(42);
//! let best = best_branch(tree.current_mut(), &rules, 2, &mut rng).unwrap();
//! if let Some(index) = best {
//!     tree.shift(index).unwrap();
//! }
//! println!("{}", tree.current().state);
//! ```

pub mod constants;
pub mod error;
pub mod hand;
pub mod movegen;
pub mod rules;
pub mod search;
pub mod session;
pub mod state;
pub mod tree;

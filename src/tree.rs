//! Game tree construction, pruning and navigation.
//!
//! Every [`Node`] owns its children outright. The parent link is not
//! stored in the node; a [`GameTree`] keeps the path of child indices
//! from the root to its cursor, which is enough to step back up.

use log::debug;

use crate::error::BaoError;
use crate::hand::{ExecStatus, Hand};
use crate::movegen::{find_trap, legal_moves};
use crate::rules::Rules;
use crate::state::{BoardState, Move};

/// A position in the game tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Position reached, prepared for the side now to move
    pub state: BoardState,
    /// Move that led here (`None` at the root)
    pub mv: Option<Move>,
    /// Reachable positions, in enumeration order
    pub children: Vec<Node>,
}

impl Node {
    /// Root node holding the initial position of `rules`.
    pub fn root(rules: &Rules) -> Self {
        Self::from_state(BoardState::new(rules))
    }

    /// Root node for an arbitrary position.
    pub fn from_state(state: BoardState) -> Self {
        Self {
            state,
            mv: None,
            children: Vec::new(),
        }
    }

    fn child(mut state: BoardState, rules: &Rules, mv: Move) -> Self {
        prepare_next_turn(&mut state, rules);
        Self {
            state,
            mv: Some(mv),
            children: Vec::new(),
        }
    }

    /// Generate the children of this node by playing out every legal move.
    ///
    /// Does nothing if children already exist. A move that halts on the
    /// house yields two children: the paused outcome and the one where the
    /// house was lifted. Moves that do not finish within
    /// `rules.max_steps` are dropped as perpetual.
    ///
    /// Returns the number of children.
    pub fn grow(&mut self, rules: &Rules) -> Result<usize, BaoError> {
        if !self.children.is_empty() {
            return Ok(self.children.len());
        }

        let moves = legal_moves(&mut self.state, rules);
        let mut children = Vec::with_capacity(moves.len());

        for mv in moves {
            let mut next = self.state.clone();
            let mut hand = Hand::start(&mut next, rules, &mv)?;
            let mut status = hand.step(rules.max_steps);

            if status == ExecStatus::Halted {
                debug!("{mv} halted on the house, keeping both outcomes");
                let paused = Move { paused: true, ..mv };
                children.push(Node::child(hand.state().clone(), rules, paused));
                hand.resume();
                status = hand.step(rules.max_steps);
            }

            match status {
                ExecStatus::Done => {
                    hand.end();
                    children.push(Node::child(next, rules, mv));
                }
                ExecStatus::NotDone => {
                    debug!("{mv} exceeded {} steps, discarding", rules.max_steps);
                    hand.end();
                }
                ExecStatus::Halted | ExecStatus::Continuing | ExecStatus::Error => {
                    let (side, hole, _) = hand.position();
                    return Err(BaoError::UndefinedExecution { side, hole });
                }
            }
        }

        self.children = children;
        Ok(self.children.len())
    }

    /// Drop every descendant of this node.
    pub fn prune(&mut self) {
        self.children = Vec::new();
    }

    /// Index of the child reached by `mv`, matching hole, direction and
    /// the paused flag.
    pub fn find(&self, mv: &Move) -> Option<usize> {
        self.children.iter().position(|c| c.mv.as_ref() == Some(mv))
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }
}

/// Hand the board over to the opponent.
///
/// After a second-stage plain sow the trap is recomputed for the side that
/// just moved; otherwise it is cleared.
fn prepare_next_turn(state: &mut BoardState, rules: &Rules) {
    state.trapped = if rules.has_trap && state.plain_sow && !state.in_first_stage(state.player) {
        find_trap(state, rules)
    } else {
        None
    };
    state.plain_sow = false;
    state.player = state.player.opponent();
}

/// A game tree with a cursor.
#[derive(Debug, Clone)]
pub struct GameTree {
    root: Node,
    /// Child indices leading from the root to the cursor
    path: Vec<usize>,
}

impl GameTree {
    /// New game for `rules`; the cursor starts at the root.
    pub fn new(rules: &Rules) -> Self {
        Self::from_root(Node::root(rules))
    }

    pub fn from_root(root: Node) -> Self {
        Self {
            root,
            path: Vec::new(),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Node under the cursor.
    pub fn current(&self) -> &Node {
        self.path
            .iter()
            .fold(&self.root, |node, &idx| &node.children[idx])
    }

    pub fn current_mut(&mut self) -> &mut Node {
        let mut node = &mut self.root;
        for &idx in &self.path {
            node = &mut node.children[idx];
        }
        node
    }

    /// Parent of the node under the cursor, `None` at the root.
    pub fn parent(&self) -> Option<&Node> {
        let (_, up) = self.path.split_last()?;
        Some(up.iter().fold(&self.root, |node, &idx| &node.children[idx]))
    }

    /// Number of moves between the root and the cursor.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Move the cursor to child `index`.
    pub fn shift(&mut self, index: usize) -> Result<(), BaoError> {
        let len = self.current().children.len();
        if index >= len {
            return Err(BaoError::InvalidBranch { index, len });
        }
        self.path.push(index);
        Ok(())
    }

    /// Move the cursor back to the parent.
    pub fn unshift(&mut self) -> Result<(), BaoError> {
        self.path.pop().map(|_| ()).ok_or(BaoError::NoParent)
    }
}

//! Line-oriented play session.
//!
//! Drives a [`GameTree`] from text commands, one per line. Responses are
//! prefixed with `=` on success and `?` on failure.
//!
//! ## Commands
//!
//! - `show` - Print the position under the cursor
//! - `moves` - List the legal moves (1-based)
//! - `<n>` - Start animating move `n` from the current position
//! - `next` - Advance the animation by one step
//! - `finish` - Run the animation to its end
//! - `go` - Lift the house the animation halted on
//! - `pick <n>` - Play move `n`
//! - `ai` - Let the engine choose and play a move
//! - `back` - Take back the last move
//! - `quit` - Exit

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::error::BaoError;
use crate::hand::{ExecStatus, Hand};
use crate::rules::Rules;
use crate::search::best_branch;
use crate::state::{BoardState, Move};
use crate::tree::GameTree;

const KNOWN_COMMANDS: &[&str] = &[
    "ai", "back", "finish", "go", "moves", "next", "pick", "quit", "show",
];

/// A move being shown step by step.
struct Animation {
    before: BoardState,
    mv: Move,
    /// Steps to replay from `before`
    steps: usize,
    /// Lift the house if the hand halts on it
    resumed: bool,
}

impl Animation {
    /// Replay the animation from scratch up to its current step count.
    fn replay(&self, rules: &Rules) -> Result<(BoardState, ExecStatus), BaoError> {
        let mut state = self.before.clone();
        let mut hand = Hand::start(&mut state, rules, &self.mv)?;
        let mut status = ExecStatus::Continuing;
        while hand.steps_taken() < self.steps {
            status = hand.step(1);
            match status {
                ExecStatus::NotDone => {}
                ExecStatus::Halted if self.resumed => hand.resume(),
                _ => break,
            }
        }
        let (side, hole, seeds) = hand.position();
        hand.end();
        debug!("animation at {side} hole {hole} holding {seeds}");
        Ok((state, status))
    }
}

/// Interactive game state.
pub struct Session {
    rules: Rules,
    tree: GameTree,
    depth: usize,
    rng: fastrand::Rng,
    animation: Option<Animation>,
}

impl Session {
    pub fn new(rules: Rules, depth: usize, rng: fastrand::Rng) -> Self {
        let tree = GameTree::new(&rules);
        Self {
            rules,
            tree,
            depth,
            rng,
            animation: None,
        }
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);
            let prefix = if success { '=' } else { '?' };
            writeln!(out, "{prefix} {message}\n")?;
            out.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        let result = match command {
            "show" => Ok(self.tree.current().state.to_string()),
            "moves" => self.list_moves(),
            "next" => self.animate(|a, _| a.steps += 1),
            "finish" => self.animate(|a, max| a.steps = max),
            "go" => self.animate(|a, _| a.resumed = true),
            "pick" => match args.first().and_then(|s| parse_index(s)) {
                Some(i) => self.pick(i),
                None => return (false, "missing or invalid move number".to_string()),
            },
            "ai" => self.ai(),
            "back" => {
                self.animation = None;
                self.tree.unshift().map(|_| self.tree.current().state.to_string())
            }
            "quit" => Ok(String::new()),
            _ => match parse_index(command) {
                Some(i) => self.start_animation(i),
                None => {
                    return (
                        false,
                        format!(
                            "unknown command: {command} (known: {})",
                            KNOWN_COMMANDS.join(", ")
                        ),
                    );
                }
            },
        };
        match result {
            Ok(message) => (true, message),
            Err(e) => (false, e.to_string()),
        }
    }

    fn list_moves(&mut self) -> Result<String, BaoError> {
        let node = self.tree.current_mut();
        node.grow(&self.rules)?;
        if node.children.is_empty() {
            return Ok(format!("{} has no legal move", node.state.player));
        }
        let listed: Vec<String> = node
            .children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| child.mv.map(|mv| format!("{}.{mv}", i + 1)))
            .collect();
        Ok(listed.join(" "))
    }

    fn pick(&mut self, index: usize) -> Result<String, BaoError> {
        self.tree.current_mut().grow(&self.rules)?;
        self.tree.shift(index)?;
        self.animation = None;
        Ok(self.tree.current().state.to_string())
    }

    fn ai(&mut self) -> Result<String, BaoError> {
        let node = self.tree.current_mut();
        let Some(index) = best_branch(node, &self.rules, self.depth, &mut self.rng)? else {
            return Ok(format!("{} has no legal move", node.state.player));
        };
        let mv = node.children[index].mv;
        info!("engine plays branch {index}");
        self.tree.shift(index)?;
        self.animation = None;
        let played = mv.map(|m| m.to_string()).unwrap_or_default();
        Ok(format!("{played}\n{}", self.tree.current().state))
    }

    fn start_animation(&mut self, index: usize) -> Result<String, BaoError> {
        let node = self.tree.current_mut();
        let len = node.grow(&self.rules)?;
        let mv = node
            .children
            .get(index)
            .and_then(|c| c.mv)
            .ok_or(BaoError::InvalidBranch { index, len })?;
        self.animation = Some(Animation {
            before: node.state.clone(),
            mv: Move { paused: false, ..mv },
            steps: 0,
            resumed: false,
        });
        self.animate(|_, _| {})
    }

    fn animate(&mut self, update: impl FnOnce(&mut Animation, usize)) -> Result<String, BaoError> {
        let Some(animation) = self.animation.as_mut() else {
            return Ok("no move in progress".to_string());
        };
        update(animation, self.rules.max_steps);
        let (state, status) = animation.replay(&self.rules)?;
        let label = match status {
            ExecStatus::Halted => "halted on the house (go to lift it)",
            ExecStatus::Done => "move completed",
            ExecStatus::Error => "undefined execution condition",
            ExecStatus::Continuing | ExecStatus::NotDone => "in progress",
        };
        Ok(format!("{} step {}: {label}\n{state}", animation.mv, animation.steps))
    }
}

/// Parse a 1-based move number into an index.
fn parse_index(s: &str) -> Option<usize> {
    s.parse::<usize>().ok()?.checked_sub(1)
}

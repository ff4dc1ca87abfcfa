//! Bao engine command line.
//!
//! ## Usage
//!
//! - `bao` - Show a demo
//! - `bao play` - Play interactively on stdin/stdout
//! - `bao demo` - Grow the opening position and pick a move

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use bao_engine::constants::DEFAULT_DEPTH;
use bao_engine::rules::{Rules, Variant};
use bao_engine::search::best_branch;
use bao_engine::session::Session;
use bao_engine::tree::Node;

/// Bao engine: the East African mancala game
#[derive(Parser)]
#[command(name = "bao")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rule set to play with (kiswahili, namua, kujifunza)
    #[arg(long, default_value = "kiswahili")]
    variant: Variant,

    /// Search depth used when the engine picks a move
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Seed for tie-breaking between equally scored moves
    #[arg(long)]
    seed: Option<u64>,

    /// Override the step bound after which a move counts as perpetual
    #[arg(long)]
    max_steps: Option<usize>,

    /// Log search and execution details
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively, one command per line
    Play,
    /// Grow the opening position and show the engine's choice
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut rules = cli.variant.rules();
    if let Some(max_steps) = cli.max_steps {
        rules.max_steps = max_steps;
    }
    let rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    info!("playing {} at depth {}", cli.variant, cli.depth);

    match cli.command {
        Some(Commands::Play) => {
            let mut session = Session::new(rules, cli.depth, rng);
            session
                .run(io::stdin().lock(), io::stdout().lock())
                .context("interactive session failed")?;
        }
        Some(Commands::Demo) | None => run_demo(&rules, cli.depth, rng)?,
    }
    Ok(())
}

fn run_demo(rules: &Rules, depth: usize, mut rng: fastrand::Rng) -> Result<()> {
    println!("Bao engine\n");

    let mut root = Node::root(rules);
    let n = root.grow(rules).context("could not grow the opening position")?;
    println!("{n} moves from the opening position:");
    println!("{}\n", root.state);

    for (i, child) in root.children.iter().enumerate() {
        if let Some(mv) = child.mv {
            println!("{}. {mv}", i + 1);
        }
        println!("{}\n", child.state);
    }

    println!("Searching {depth} plies...");
    match best_branch(&mut root, rules, depth, &mut rng).context("search failed")? {
        Some(i) => {
            let mv = root.children[i].mv.map(|m| m.to_string()).unwrap_or_default();
            println!("Best branch: {} ({mv})", i + 1);
        }
        None => println!("{} has no legal move", root.state.player),
    }
    Ok(())
}

//! Combat simulator.
//!
//! Runs seeded battles between roster actors to check balance and replay
//! specific fights. Run with: `cargo run -p combat-sim -- <command>`

mod battle;
mod commands;
mod content;

use anyhow::Result;
use clap::Parser;
use commands::{Duel, Roster};

/// Seeded combat simulator
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Seeded duel simulator for the combat rules", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run N seeded battles between two roster actors
    Duel(Duel),

    /// List roster actors and their action kits
    Roster(Roster),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Duel(cmd) => cmd.execute(),
        Command::Roster(cmd) => cmd.execute(),
    }
}

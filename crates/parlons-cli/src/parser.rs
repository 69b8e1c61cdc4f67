//! Root CLI structure and global options.

use clap::Parser;

use crate::commands::Commands;

/// Listen to a prompt, say it in French, hear the answer.
#[derive(Parser)]
#[command(name = "parlons")]
#[command(about = "French sentence audio drills")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

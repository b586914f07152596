// src/cli/mod.rs
use clap::Parser;

pub mod commands;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(name = "passguard", author, version, about = "Password strength and distribution utility", long_about = None)]
pub struct Args {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: CliCommand,
}

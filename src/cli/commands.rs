// src/cli/commands.rs
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Check strength of a password
    Check {
        /// Password to check (if omitted, reads hidden input)
        #[arg(long, short)]
        password: Option<String>,

        /// Minimum allowed length
        #[arg(long)]
        min_length: Option<usize>,

        /// Check the HIBP breach database (k-anonymity range query)
        #[arg(long)]
        hibp: bool,
    },

    /// Generate a strong password
    Generate {
        /// Password length (clamped to 16-24)
        #[arg(long)]
        length: Option<usize>,

        /// Do not include symbols
        #[arg(long)]
        no_symbols: bool,

        /// Do not print the password to standard output
        #[arg(long)]
        quiet: bool,

        /// Send the generated password to Slack (configured via environment)
        #[arg(long)]
        slack: bool,
    },
}

// src/main.rs
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use rust_passguard::cli::{handlers, Args, CliCommand};
use rust_passguard::core::config::Config;

fn main() -> ExitCode {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let config = Config::load();

    let level = if args.verbose { LevelFilter::Debug } else { config.log_level };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();

    log::debug!("Loaded config: {:?}", config);

    let outcome = match args.command {
        CliCommand::Check { password, min_length, hibp } => {
            handlers::handle_check(&config, password, min_length, hibp, args.json)
        }
        CliCommand::Generate { length, no_symbols, quiet, slack } => {
            handlers::handle_generate(&config, length, no_symbols, quiet, slack, args.json)
        }
    };

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

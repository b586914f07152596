// src/cli/handlers.rs
use std::io::{self, IsTerminal, Read};

use serde::Serialize;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::core::config::Config;
use crate::generators::generate_password;
use crate::models::{EvaluationResult, PasswordGenerationOptions};
use crate::notify::{RelayOutcome, SlackClient};
use crate::policy::{evaluate_password_bytes, BreachChecker};

/// Exit status for a password that fails the policy.
pub const EXIT_POLICY_FAILURE: u8 = 2;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Serialize)]
struct GenerateReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    relay: Option<RelayOutcome>,
}

// Hidden prompt on a terminal, otherwise the first line of stdin
fn read_password() -> Result<Zeroizing<Vec<u8>>> {
    if io::stdin().is_terminal() {
        let password = inquire::Password::new("Enter password to check (input hidden):")
            .with_display_mode(inquire::PasswordDisplayMode::Hidden)
            .without_confirmation()
            .prompt()?;
        return Ok(Zeroizing::new(password.into_bytes()));
    }

    let mut input = Zeroizing::new(Vec::new());
    io::stdin().read_to_end(&mut input)?;
    let line_end = input.iter().position(|&b| b == b'\n').unwrap_or(input.len());
    input.truncate(line_end);
    if input.last() == Some(&b'\r') {
        input.pop();
    }
    Ok(input)
}

fn print_evaluation(result: &EvaluationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("OK: {}", result.ok);
    println!("Score: {}", result.score);
    for reason in &result.reasons {
        println!("- {}", reason);
    }
    Ok(())
}

/// Evaluate a password and print the outcome. Never prints the password itself.
pub fn handle_check(
    config: &Config,
    password: Option<String>,
    min_length: Option<usize>,
    hibp: bool,
    json: bool,
) -> Result<u8> {
    let password = match password {
        Some(p) => Zeroizing::new(p.into_bytes()),
        None => read_password()?,
    };
    let min_length = min_length.unwrap_or(config.default_min_length);

    let client = config.hibp_client();
    let checker: Option<&dyn BreachChecker> = if hibp { Some(&client) } else { None };

    let result = evaluate_password_bytes(&password, min_length, hibp, checker);
    log::info!("Password check finished (ok: {}, score: {})", result.ok, result.score);

    print_evaluation(&result, json)?;

    Ok(if result.ok { 0 } else { EXIT_POLICY_FAILURE })
}

/// Generate a password, display it once unless `quiet`, optionally relay it to Slack.
pub fn handle_generate(
    config: &Config,
    length: Option<usize>,
    no_symbols: bool,
    quiet: bool,
    slack: bool,
    json: bool,
) -> Result<u8> {
    let options = PasswordGenerationOptions {
        length: length.unwrap_or(config.default_password_length),
        include_symbols: !no_symbols,
        require_each_class: true,
    };
    let password = Zeroizing::new(generate_password(&options));
    log::info!("Generated a {} character password", password.len());

    if !json {
        if quiet {
            println!("Password generated (suppressed display due to --quiet).");
        } else {
            println!("Generated password (displaying once):");
            println!("{}", password.as_str());
        }
    }

    let relay = if slack {
        let text = Zeroizing::new(format!(
            "Secret password (generated), keep secure: `{}`",
            password.as_str()
        ));
        let outcome = SlackClient::new().relay(&config.slack, &text);
        log::info!("Slack relay outcome: {:?}", outcome);
        if !json {
            match outcome {
                RelayOutcome::Sent => println!("Password sent to Slack successfully (not shown)."),
                RelayOutcome::Failed => println!("Failed to send password to Slack."),
                RelayOutcome::NotConfigured => println!(
                    "Slack not configured. Set SLACK_WEBHOOK_URL or SLACK_BOT_TOKEN + SLACK_CHANNEL_ID in environment."
                ),
            }
        }
        Some(outcome)
    } else {
        None
    };

    if json {
        let report = GenerateReport {
            password: if quiet { None } else { Some(password.as_str()) },
            length: password.len(),
            relay,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(0)
}

// src/lib.rs
//! Password policy checks, k-anonymity breach lookups, password generation
//! and Slack relaying.

pub mod cli;
pub mod core;
pub mod generators;
pub mod hibp;
pub mod models;
pub mod notify;
pub mod policy;

pub use crate::generators::generate_password;
pub use crate::hibp::{check_sha1_in_hibp, HibpClient, HibpError};
pub use crate::models::{CharClassReport, EvaluationResult, PasswordGenerationOptions};
pub use crate::notify::{send_via_bot_token, send_via_webhook, RelayOutcome, SlackClient};
pub use crate::policy::{check_char_classes, evaluate_password, BreachChecker};

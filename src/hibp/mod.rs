// src/hibp/mod.rs
//! k-anonymity range lookups against the Pwned Passwords API.
//!
//! Only the first five hex characters of the SHA-1 digest are sent; the
//! service answers with every suffix sharing that prefix and the match is
//! done locally.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use thiserror::Error;

use crate::policy::{BoxError, BreachChecker};

pub const DEFAULT_API_URL: &str = "https://api.pwnedpasswords.com";
pub const DEFAULT_USER_AGENT: &str = concat!("rust_passguard/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const PREFIX_LEN: usize = 5;
const SHA1_HEX_LEN: usize = 40;

#[derive(Error, Debug)]
pub enum HibpError {
    #[error("{0}")]
    Validation(String),

    #[error("HIBP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HIBP range API returned status code {0}")]
    Service(u16),
}

pub type Result<T> = std::result::Result<T, HibpError>;

/// Blocking client for the range endpoint.
#[derive(Debug, Clone)]
pub struct HibpClient {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    add_padding: bool,
}

impl Default for HibpClient {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            add_padding: false,
        }
    }
}

impl HibpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ask the service to pad responses with zero-count decoy suffixes.
    pub fn with_padding(mut self, add_padding: bool) -> Self {
        self.add_padding = add_padding;
        self
    }

    /// Returns true when the suffix of `sha1` appears in the range response for its prefix.
    pub fn check_sha1(&self, sha1: &str) -> Result<bool> {
        validate_sha1(sha1)?;

        let (prefix, suffix) = sha1.split_at(PREFIX_LEN);
        let url = format!("{}/range/{}", self.base_url, prefix.to_ascii_uppercase());

        log::debug!("Querying HIBP range for prefix {}", prefix);

        let client = Client::builder().timeout(self.timeout).build()?;
        let mut request = client.get(&url).header(USER_AGENT, &self.user_agent);
        if self.add_padding {
            request = request.header("Add-Padding", "true");
        }
        let response = request.send()?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("HIBP range API answered {} for prefix {}", status, prefix);
            return Err(HibpError::Service(status.as_u16()));
        }

        let body = response.text()?;
        let found = range_contains_suffix(&body, suffix, self.add_padding);
        log::debug!("HIBP range lookup for prefix {} complete (match: {})", prefix, found);
        Ok(found)
    }
}

impl BreachChecker for HibpClient {
    fn is_breached(&self, sha1: &str) -> std::result::Result<bool, BoxError> {
        Ok(self.check_sha1(sha1)?)
    }
}

/// Check `sha1` with the default client settings.
pub fn check_sha1_in_hibp(sha1: &str) -> Result<bool> {
    HibpClient::default().check_sha1(sha1)
}

fn validate_sha1(sha1: &str) -> Result<()> {
    if sha1.len() != SHA1_HEX_LEN || !sha1.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HibpError::Validation(
            "sha1 must be 40-hex uppercase string".to_string(),
        ));
    }
    Ok(())
}

/// Scan a range response body (`SUFFIX:COUNT` per line) for `suffix`.
///
/// Blank and malformed lines are skipped. With `padded` set, zero-count
/// lines are the service's decoy records and never match.
pub fn range_contains_suffix(body: &str, suffix: &str, padded: bool) -> bool {
    body.lines()
        .filter_map(|line| {
            let mut fields = line.split(':');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(found), Some(count), None) => Some((found.trim(), count.trim())),
                _ => None,
            }
        })
        .filter(|(_, count)| !(padded && *count == "0"))
        .any(|(found, _)| found.eq_ignore_ascii_case(suffix))
}

// src/notify/mod.rs
//! Slack delivery for generated passwords.
//!
//! Every failure collapses to `false` so that no error text (which could
//! echo the message) escapes. Callers must never log the `text` argument.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::core::config::SlackConfig;

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
}

#[derive(Serialize)]
struct PostMessagePayload<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct PostMessageResponse {
    #[serde(default)]
    ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayOutcome {
    Sent,
    Failed,
    NotConfigured,
}

#[derive(Debug, Clone)]
pub struct SlackClient {
    api_url: String,
    timeout: Duration,
}

impl Default for SlackClient {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_SLACK_API_URL.to_string(),
            timeout: SEND_TIMEOUT,
        }
    }
}

impl SlackClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the Web API base used for `chat.postMessage`.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    fn client(&self) -> Option<Client> {
        Client::builder().timeout(self.timeout).build().ok()
    }

    /// POST `text` to an incoming webhook. True only on HTTP 200.
    pub fn send_via_webhook(
        &self,
        webhook_url: &str,
        text: &str,
        channel: Option<&str>,
        username: Option<&str>,
    ) -> bool {
        let Some(client) = self.client() else {
            return false;
        };
        let payload = WebhookPayload { text, channel, username };

        match client.post(webhook_url).json(&payload).send() {
            Ok(resp) => {
                let status = resp.status();
                if status != StatusCode::OK {
                    log::warn!("Slack webhook answered {}", status);
                }
                status == StatusCode::OK
            }
            Err(_) => {
                log::warn!("Slack webhook request failed");
                false
            }
        }
    }

    /// Send `text` with `chat.postMessage`. True only when the response says `"ok": true`.
    pub fn send_via_bot_token(&self, token: &str, channel_id: &str, text: &str) -> bool {
        let Some(client) = self.client() else {
            return false;
        };
        let url = format!("{}/chat.postMessage", self.api_url);
        let payload = PostMessagePayload { channel: channel_id, text };

        let response = match client.post(&url).bearer_auth(token).json(&payload).send() {
            Ok(resp) => resp,
            Err(_) => {
                log::warn!("Slack chat.postMessage request failed");
                return false;
            }
        };

        match response.json::<PostMessageResponse>() {
            Ok(body) => {
                if !body.ok {
                    log::warn!("Slack chat.postMessage rejected the message");
                }
                body.ok
            }
            Err(_) => {
                log::warn!("Slack chat.postMessage returned an unreadable body");
                false
            }
        }
    }

    /// Deliver `text` over whichever transport `config` enables, webhook first.
    pub fn relay(&self, config: &SlackConfig, text: &str) -> RelayOutcome {
        let sent = if let Some(webhook_url) = config.webhook_url.as_deref() {
            log::debug!("Relaying via Slack webhook");
            self.send_via_webhook(webhook_url, text, None, None)
        } else if let (Some(token), Some(channel_id)) =
            (config.bot_token.as_deref(), config.channel_id.as_deref())
        {
            log::debug!("Relaying via Slack bot token to channel {}", channel_id);
            self.send_via_bot_token(token, channel_id, text)
        } else {
            return RelayOutcome::NotConfigured;
        };

        if sent {
            RelayOutcome::Sent
        } else {
            RelayOutcome::Failed
        }
    }
}

pub fn send_via_webhook(webhook_url: &str, text: &str, channel: Option<&str>, username: Option<&str>) -> bool {
    SlackClient::default().send_via_webhook(webhook_url, text, channel, username)
}

pub fn send_via_bot_token(token: &str, channel_id: &str, text: &str) -> bool {
    SlackClient::default().send_via_bot_token(token, channel_id, text)
}

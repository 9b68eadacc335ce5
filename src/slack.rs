use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Bot display identity attached to every outbound message.
#[derive(Debug, Clone, Default)]
pub struct MessageParams {
    pub username: Option<String>,
    pub icon_url: Option<String>,
}

/// Outbound chat delivery. Channels and groups are addressed separately
/// because the configuration lists them separately; replies go back to
/// whichever channel the request arrived on.
#[async_trait]
pub trait ChatSender {
    async fn send_to_channel(&self, channel: &str, text: &str, params: &MessageParams)
    -> Result<()>;

    async fn send_to_group(&self, group: &str, text: &str, params: &MessageParams) -> Result<()>;

    async fn reply(&self, channel: &str, text: &str, params: &MessageParams) -> Result<()>;
}

/// Slack Web API envelope: failures come back as `ok: false` with an
/// error code, not as an HTTP error.
#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
}

/// `ChatSender` backed by Slack's `chat.postMessage`.
pub struct SlackSender {
    http: reqwest::Client,
    token: String,
}

impl SlackSender {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
        }
    }

    async fn post_message(&self, channel: &str, text: &str, params: &MessageParams) -> Result<()> {
        let mut body = serde_json::json!({
            "channel": channel,
            "text": text,
        });
        if let Some(username) = &params.username {
            body["username"] = serde_json::Value::String(username.clone());
        }
        if let Some(icon_url) = &params.icon_url {
            body["icon_url"] = serde_json::Value::String(icon_url.clone());
        }

        let response: SlackResponse = self
            .http
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to send Slack message to '{}'", channel))?
            .json()
            .await
            .context("Failed to decode Slack response")?;

        if !response.ok {
            anyhow::bail!(
                "Slack rejected message to '{}': {}",
                channel,
                response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        Ok(())
    }
}

#[async_trait]
impl ChatSender for SlackSender {
    async fn send_to_channel(
        &self,
        channel: &str,
        text: &str,
        params: &MessageParams,
    ) -> Result<()> {
        self.post_message(channel, text, params).await
    }

    // Groups are private channels; chat.postMessage addresses both.
    async fn send_to_group(&self, group: &str, text: &str, params: &MessageParams) -> Result<()> {
        self.post_message(group, text, params).await
    }

    async fn reply(&self, channel: &str, text: &str, params: &MessageParams) -> Result<()> {
        self.post_message(channel, text, params).await
    }
}

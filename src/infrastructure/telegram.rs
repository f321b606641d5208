//! # Telegram Service Adapter
//!
//! Implements the `ChatProvider` trait on top of the Telegram Bot API using long-polling
//! (`getUpdates`). No public URL or webhook is needed.
//!
//! Updates are handed to the `CommandRouter` one at a time, in order. Connection and
//! polling errors are retried forever with a capped exponential backoff.

use crate::application::router::CommandRouter;
use crate::domain::traits::ChatProvider;
use crate::strings::logs;
use crate::strings::messages::{MESSAGE_LIMIT, split_message};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const MAX_BACKOFF_SECS: u64 = 60;

// ── Bot API Types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TgResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The Bot API answered `ok: false`. Transport and decoding failures are plain
/// `anyhow` errors; only this one means the request was definitely not applied.
#[derive(Debug)]
pub struct ApiRejected {
    pub method: String,
    pub description: String,
}

impl std::fmt::Display for ApiRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.method, self.description)
    }
}

impl std::error::Error for ApiRejected {}

// ── API Client ─────────────────────────────────────────────────────────

pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, poll_timeout: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout + 15))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_http(http, api_url, token))
    }

    fn with_http(http: reqwest::Client, api_url: &str, token: &str) -> Self {
        Self {
            http,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: serde_json::Value) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);
        let resp: TgResponse<T> = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("{method} request failed"))?
            .json()
            .await
            .with_context(|| format!("{method} returned malformed JSON"))?;

        if !resp.ok {
            return Err(ApiRejected {
                method: method.to_string(),
                description: resp.description.unwrap_or_default(),
            }
            .into());
        }
        resp.result
            .with_context(|| format!("{method} returned no result"))
    }

    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", serde_json::json!({})).await
    }

    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            serde_json::json!({
                "offset": offset,
                "timeout": timeout,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    /// Send `text`, split into chunks below the size limit. A Markdown send that the API
    /// rejects (usually unbalanced markup) is retried once as plain text; any other
    /// failure may mean the message went out, so it is returned as is.
    pub async fn send_message(&self, chat_id: i64, text: &str, markdown: bool) -> Result<i64> {
        let mut last_id = 0;
        for chunk in split_message(text, MESSAGE_LIMIT) {
            let mut body = serde_json::json!({ "chat_id": chat_id, "text": chunk });
            if markdown {
                body["parse_mode"] = serde_json::json!("Markdown");
            }
            let sent: Result<Message> = self.call("sendMessage", body).await;

            let message = match sent {
                Ok(message) => message,
                Err(e) if markdown && e.is::<ApiRejected>() => {
                    tracing::warn!("Markdown send failed, retrying as plain text: {e:#}");
                    self.call(
                        "sendMessage",
                        serde_json::json!({ "chat_id": chat_id, "text": chunk }),
                    )
                    .await?
                }
                Err(e) => return Err(e),
            };
            last_id = message.message_id;
        }
        Ok(last_id)
    }

    pub async fn send_chat_action(&self, chat_id: i64) -> Result<()> {
        let _: bool = self
            .call(
                "sendChatAction",
                serde_json::json!({ "chat_id": chat_id, "action": "typing" }),
            )
            .await?;
        Ok(())
    }
}

/// 1s, 2s, 4s, ... capped at 60s.
pub fn reconnect_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64.checked_shl(attempt).unwrap_or(u64::MAX).min(MAX_BACKOFF_SECS))
}

// ── Chat Provider ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct TelegramChat {
    client: Arc<TelegramClient>,
    chat_id: i64,
}

impl TelegramChat {
    pub fn new(client: Arc<TelegramClient>, chat_id: i64) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl ChatProvider for TelegramChat {
    fn chat_id(&self) -> i64 {
        self.chat_id
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.chat_id, content);
        self.client
            .send_message(self.chat_id, content, true)
            .await
            .map(|id| id.to_string())
            .map_err(|e| format!("{e:#}"))
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        self.client
            .send_message(self.chat_id, content, false)
            .await
            .map(|_| ())
            .map_err(|e| format!("{e:#}"))
    }

    async fn typing(&self, active: bool) -> Result<(), String> {
        // The Bot API has no "stop typing"; the indicator expires on its own.
        if !active {
            return Ok(());
        }
        self.client
            .send_chat_action(self.chat_id)
            .await
            .map_err(|e| format!("{e:#}"))
    }
}

// ── Bridge Core ────────────────────────────────────────────────────────

/// Verify the token with `getMe`, retrying until Telegram answers.
pub async fn connect(client: &TelegramClient) -> User {
    let mut attempt = 0;
    loop {
        match client.get_me().await {
            Ok(me) => {
                tracing::info!(
                    "{}",
                    logs::connected_as(me.username.as_deref().unwrap_or(&me.first_name), me.id)
                );
                return me;
            }
            Err(e) => {
                tracing::error!("{}", logs::connect_failed(&format!("{e:#}")));
                let delay = reconnect_delay(attempt);
                attempt += 1;
                tracing::warn!("{}", logs::reconnecting(delay.as_secs(), attempt));
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Fetch one batch of updates and route them in order. Returns the offset for the
/// next `getUpdates`, which is past every update in the batch, skipped ones included.
pub async fn poll_once(
    client: &Arc<TelegramClient>,
    router: &CommandRouter,
    offset: i64,
    timeout: u64,
) -> Result<i64> {
    let updates = client.get_updates(offset, timeout).await?;
    let mut next = offset;

    for update in updates {
        next = next.max(update.update_id + 1);
        let Some((chat_id, text)) = dispatchable(&update) else {
            continue;
        };
        tracing::info!("Received message from {}: {}", chat_id, text);

        let chat = TelegramChat::new(client.clone(), chat_id);
        if let Err(e) = router.route(&chat, text).await {
            tracing::error!("Failed to route message: {e:#}");
        }
    }
    Ok(next)
}

/// The main polling loop. Runs until the surrounding task is dropped.
pub async fn run_polling(client: Arc<TelegramClient>, router: Arc<CommandRouter>, timeout: u64) {
    tracing::info!("{}", logs::POLL_LOOP_START);
    let mut offset: i64 = 0;
    let mut attempt: u32 = 0;

    loop {
        match poll_once(&client, &router, offset, timeout).await {
            Ok(next) => {
                attempt = 0;
                offset = next;
            }
            Err(e) => {
                tracing::error!("{}", logs::poll_failed(&format!("{e:#}")));
                let delay = reconnect_delay(attempt);
                attempt += 1;
                tracing::warn!("{}", logs::reconnecting(delay.as_secs(), attempt));
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Text messages from humans; everything else is skipped.
fn dispatchable(update: &Update) -> Option<(i64, &str)> {
    let message = update.message.as_ref()?;
    if message.from.as_ref().is_some_and(|u| u.is_bot) {
        return None;
    }
    let text = message.text.as_deref().filter(|t| !t.is_empty())?;
    Some((message.chat.id, text))
}

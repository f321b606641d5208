//! # Authorization Guard
//!
//! Gates every command handler behind the chat id allow-list.

use crate::domain::traits::ChatProvider;
use crate::strings::{logs, messages};
use anyhow::Result;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Authorizer {
    allowed: HashSet<i64>,
}

impl Authorizer {
    pub fn new(chat_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed: chat_ids.into_iter().collect(),
        }
    }

    pub fn is_authorized(&self, chat_id: i64) -> bool {
        self.allowed.contains(&chat_id)
    }

    /// Returns `true` when the handler may run. Otherwise the sender gets the
    /// rejection reply and `false` is returned.
    pub async fn guard(&self, chat: &impl ChatProvider, command: &str) -> Result<bool> {
        if self.is_authorized(chat.chat_id()) {
            return Ok(true);
        }
        tracing::warn!("{}", logs::unauthorized_attempt(chat.chat_id(), command));
        chat.send_message(messages::UNAUTHORIZED)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        Ok(false)
    }
}

//! # Domain Traits
//!
//! Abstract interfaces for the chat transport and the host service manager.
//! Allows for pluggable implementations in the Infrastructure layer (and fakes in tests).

use crate::domain::types::LogStream;
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for a Chat Provider (e.g., Telegram, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a Markdown message to the chat, returning the message id
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a plain notification (no Markdown rendering)
    async fn send_notification(&self, content: &str) -> Result<(), String>;

    /// Send a typing indicator
    async fn typing(&self, active: bool) -> Result<(), String>;

    /// Identity of the chat the message came from
    fn chat_id(&self) -> i64;
}

/// Abstract interface over the host's process control and log files.
#[async_trait]
pub trait ServiceControl: Send + Sync {
    /// Check whether the service is currently running.
    async fn is_running(&self, service: &str) -> Result<bool>;

    async fn start(&self, service: &str) -> Result<()>;

    async fn stop(&self, service: &str) -> Result<()>;

    /// Return the last `lines` lines of the service's log stream.
    async fn tail_log(&self, service: &str, stream: LogStream, lines: usize) -> Result<String>;
}

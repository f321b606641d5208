//! # Log Lines
//!
//! Format functions for the bot's own tracing output.

pub const STARTING: &str = "Starting servbot...";
pub const POLL_LOOP_START: &str = "Starting long-poll loop...";
pub const SHUTDOWN: &str = "Shutting down...";

pub fn config_loaded(path: &str, services: &[String], chats: usize) -> String {
    format!(
        "Loaded configuration from {path}: services={services:?}, allowed chats={chats}"
    )
}

pub fn connected_as(username: &str, id: i64) -> String {
    format!("Connected to Telegram as @{username} ({id})")
}

pub fn connect_failed(err: &str) -> String {
    format!("Failed to reach Telegram: {err}")
}

pub fn poll_failed(err: &str) -> String {
    format!("getUpdates failed: {err}")
}

pub fn reconnecting(delay_secs: u64, attempt: u32) -> String {
    format!("Retrying in {delay_secs}s (attempt {attempt})")
}

pub fn unauthorized_attempt(chat_id: i64, command: &str) -> String {
    format!("Rejected /{command} from unauthorized chat {chat_id}")
}

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

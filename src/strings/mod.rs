//! # Strings Module
//!
//! Centralizes user-facing replies, help text and log lines.
//! Ensures consistency in messaging and easier updates.

pub mod help;
pub mod logs;
pub mod messages;

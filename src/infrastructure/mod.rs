//! # Infrastructure Layer
//!
//! Handles interactions with external systems: the Telegram Bot API and the host's processes.
//! Implements the traits defined in the Domain layer (`ChatProvider`, `ServiceControl`).

pub mod services;
pub mod telegram;
pub mod tools;

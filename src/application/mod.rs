//! # Application Layer
//!
//! Contains the orchestration of the bot: command parsing, the authorization guard
//! and the router that dispatches to the command handlers.

pub mod auth;
pub mod parsing;
pub mod router;

#[cfg(test)]
pub mod testing;

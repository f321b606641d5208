//! # Domain Layer
//!
//! Core definitions, types, and traits that define the business domain of the bot.
//! Independent of the Telegram transport and of the shell, serving as the contract for other layers.

pub mod config;
pub mod traits;
pub mod types;

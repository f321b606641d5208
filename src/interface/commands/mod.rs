//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (`/status`, `/log`, ...).
//! These handlers are invoked by the Router after the authorization guard.

pub mod help;
pub mod log;
pub mod service;

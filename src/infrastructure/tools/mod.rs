//! # Tools Module
//!
//! Provides in-process execution of external programs (service control, log tailing).

pub mod executor;

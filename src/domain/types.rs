//! # Domain Types
//!
//! Common data structures and enums used across the application logic.

/// A parsed chat command: `/name arg1 arg2 ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Entries of the static command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Service(ServiceAction),
    Log(LogStream),
    Help,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "status" => Some(Command::Service(ServiceAction::Status)),
            "start" => Some(Command::Service(ServiceAction::Start)),
            "stop" => Some(Command::Service(ServiceAction::Stop)),
            "log" => Some(Command::Log(LogStream::Out)),
            "logerr" => Some(Command::Log(LogStream::Err)),
            "help" => Some(Command::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Status,
    Start,
    Stop,
}

/// Which of a service's two log files to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStream {
    /// `/var/log/<service>.log`
    Out,
    /// `/var/log/<service>.err`
    Err,
}

impl std::fmt::Display for LogStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogStream::Out => write!(f, "log"),
            LogStream::Err => write!(f, "err"),
        }
    }
}

//! # Log Commands
//!
//! Handles `/log <service> [n]` and `/logerr <service> [n]`.
//! Replies with the last `n` lines (default 5) of the service's log file as a code block.

use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, ServiceControl};
use crate::domain::types::LogStream;
use crate::strings::messages;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub service: String,
    pub lines: usize,
}

/// Argument problems that are answered directly in the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogArgError {
    MissingService,
    UnknownService(String),
    InvalidCount(String),
}

impl LogArgError {
    pub fn reply(&self) -> String {
        match self {
            LogArgError::MissingService => messages::NO_SERVICE_PROVIDED.to_string(),
            LogArgError::UnknownService(name) => {
                messages::unknown_services(std::slice::from_ref(name))
            }
            LogArgError::InvalidCount(raw) => messages::invalid_line_count(raw),
        }
    }
}

/// Validate `<service> [n]`. Counts above `logs.max_lines` are clamped; extra args are ignored.
pub fn parse_log_args(config: &AppConfig, args: &[String]) -> Result<LogRequest, LogArgError> {
    let service = args.first().ok_or(LogArgError::MissingService)?;
    if !config.is_known_service(service) {
        return Err(LogArgError::UnknownService(service.clone()));
    }

    let lines = match args.get(1) {
        None => config.logs.default_lines,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n.min(config.logs.max_lines),
            _ => return Err(LogArgError::InvalidCount(raw.clone())),
        },
    };

    Ok(LogRequest {
        service: service.clone(),
        lines,
    })
}

pub async fn handle_log(
    config: &AppConfig,
    services: &dyn ServiceControl,
    chat: &impl ChatProvider,
    stream: LogStream,
    args: &[String],
) -> Result<()> {
    let request = match parse_log_args(config, args) {
        Ok(request) => request,
        Err(LogArgError::MissingService) => {
            chat.send_notification(messages::NO_SERVICE_PROVIDED)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }
        Err(e) => {
            chat.send_message(&e.reply())
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }
    };

    let content = services
        .tail_log(&request.service, stream, request.lines)
        .await?;

    let replies = if content.trim().is_empty() {
        vec![messages::log_empty(&config.logs.path_for(&request.service, stream))]
    } else {
        messages::log_blocks(&content, messages::MESSAGE_LIMIT)
    };
    for reply in replies {
        chat.send_message(&reply)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}

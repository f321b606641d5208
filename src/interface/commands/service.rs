//! # Service Commands
//!
//! Handles `/status`, `/start` and `/stop`.
//! Each accepts zero or more service names; no names means every known service.

use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, ServiceControl};
use crate::domain::types::ServiceAction;
use crate::strings::messages;
use anyhow::Result;

/// Resolve the argument list against the known services.
/// `Err` carries the unknown names, deduplicated, in order of first appearance.
pub fn select_services(known: &[String], args: &[String]) -> Result<Vec<String>, Vec<String>> {
    if args.is_empty() {
        return Ok(known.to_vec());
    }

    let mut selected: Vec<String> = Vec::new();
    let mut unknown: Vec<String> = Vec::new();
    for arg in args {
        let bucket = if known.contains(arg) {
            &mut selected
        } else {
            &mut unknown
        };
        if !bucket.contains(arg) {
            bucket.push(arg.clone());
        }
    }

    if unknown.is_empty() {
        Ok(selected)
    } else {
        Err(unknown)
    }
}

pub async fn handle_service(
    config: &AppConfig,
    services: &dyn ServiceControl,
    chat: &impl ChatProvider,
    action: ServiceAction,
    args: &[String],
) -> Result<()> {
    let targets = match select_services(&config.services, args) {
        Ok(targets) => targets,
        Err(unknown) => {
            chat.send_message(&messages::unknown_services(&unknown))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }
    };

    if action != ServiceAction::Status {
        if let Err(e) = chat.typing(true).await {
            tracing::debug!("Typing indicator failed: {e}");
        }
    }

    let mut lines = Vec::with_capacity(targets.len());
    for service in &targets {
        match action {
            ServiceAction::Status => {}
            ServiceAction::Start => services.start(service).await?,
            ServiceAction::Stop => services.stop(service).await?,
        }
        let running = services.is_running(service).await?;
        lines.push(messages::service_status(service, running));
    }

    chat.send_message(&lines.join("\n"))
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

//! # Help Command
//!
//! Handles the `/help` command.

use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use anyhow::Result;

pub async fn handle_help(config: &AppConfig, chat: &impl ChatProvider) -> Result<()> {
    chat.send_message(&crate::strings::help::main(&config.services))
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

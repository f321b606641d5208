//! # Configuration
//!
//! Manages the loading and parsing of the bot's configuration file (`config.yaml`)
//! and the environment variables that override it.
//! Every section is optional; a missing file yields the built-in defaults.

use crate::domain::types::LogStream;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";
pub const CHAT_IDS_ENV: &str = "TELEGRAM_CHAT_IDS";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    /// The fixed set of services the bot may touch, in reply order.
    pub services: Vec<String>,
    pub commands: CommandsConfig,
    pub logs: LogsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            services: default_services(),
            commands: CommandsConfig::default(),
            logs: LogsConfig::default(),
        }
    }
}

fn default_services() -> Vec<String> {
    ["homebridge", "lirc", "lamp_ir", "dingdong", "bot"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Bot API connection settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TelegramConfig {
    pub token: Option<String>,
    /// Allow-listed chat ids.
    pub chat_ids: Vec<i64>,
    /// Long-poll timeout handed to `getUpdates`, in seconds.
    pub poll_timeout: u64,
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            chat_ids: Vec::new(),
            poll_timeout: 30,
            api_url: "https://api.telegram.org".to_string(),
        }
    }
}

/// Argv templates for process control. `{service}` is substituted into every element.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommandsConfig {
    pub status: Vec<String>,
    pub start: Vec<String>,
    pub stop: Vec<String>,
    /// `{lines}` and `{path}` are substituted.
    pub tail: Vec<String>,
    /// Per-command timeout in seconds.
    pub timeout: u64,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            status: argv(&["/etc/init.d/{service}", "status"]),
            start: argv(&["sudo", "systemctl", "start", "{service}"]),
            stop: argv(&["sudo", "systemctl", "stop", "{service}"]),
            tail: argv(&["tail", "-n", "{lines}", "{path}"]),
            timeout: 30,
        }
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogsConfig {
    pub stdout_path: String,
    pub stderr_path: String,
    pub default_lines: usize,
    pub max_lines: usize,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            stdout_path: "/var/log/{service}.log".to_string(),
            stderr_path: "/var/log/{service}.err".to_string(),
            default_lines: 5,
            max_lines: 200,
        }
    }
}

impl LogsConfig {
    pub fn path_for(&self, service: &str, stream: LogStream) -> String {
        let template = match stream {
            LogStream::Out => &self.stdout_path,
            LogStream::Err => &self.stderr_path,
        };
        template.replace("{service}", service)
    }
}

impl AppConfig {
    /// Read the YAML file at `path`. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `TELEGRAM_TOKEN` / `TELEGRAM_CHAT_IDS` on top of the file values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.telegram.token = Some(token.trim().to_string());
        }
        if let Some(raw) = lookup(CHAT_IDS_ENV) {
            self.telegram.chat_ids =
                parse_chat_ids(&raw).with_context(|| format!("Invalid {CHAT_IDS_ENV}"))?;
        }
        Ok(())
    }

    /// Check that the bot can actually run with this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.token.as_deref().is_none_or(str::is_empty) {
            bail!("No bot token configured (set {TOKEN_ENV})");
        }
        if self.services.is_empty() {
            bail!("No services configured");
        }
        for (name, template) in [
            ("status", &self.commands.status),
            ("start", &self.commands.start),
            ("stop", &self.commands.stop),
            ("tail", &self.commands.tail),
        ] {
            if template.is_empty() {
                bail!("Command template `{name}` is empty");
            }
        }
        if self.telegram.chat_ids.is_empty() {
            tracing::warn!("Chat allow-list is empty: every command will be rejected");
        }
        Ok(())
    }

    pub fn is_known_service(&self, name: &str) -> bool {
        self.services.iter().any(|s| s == name)
    }
}

/// Parse a comma-separated list of integer chat ids. Blank entries are skipped.
pub fn parse_chat_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("`{s}` is not a chat id"))
        })
        .collect()
}

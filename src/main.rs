//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: Configuration, Types and Traits
//! - Infrastructure: Telegram long-polling, shell service control
//! - Application: Router, Authorization Guard
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::infrastructure::services::ShellServiceControl;
use crate::infrastructure::telegram::{self, TelegramClient};
use crate::infrastructure::tools::executor::CommandExecutor;
use crate::strings::logs;

/// Control host services from a Telegram chat.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML configuration file (optional; defaults apply when missing)
    #[arg(long, env = "SERVBOT_CONFIG", default_value = "data/config.yaml")]
    config: PathBuf,

    /// Also write logs to `<dir>/servbot.log`, rotated daily
    #[arg(long, env = "SERVBOT_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Logging Setup
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,reqwest=warn,hyper=warn"));

    let (file_layer, _guard) = match &args.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::daily(dir, "servbot.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("{}", logs::STARTING);

    // 2. Load Configuration (file, then environment)
    let mut config = AppConfig::load(&args.config)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;
    tracing::info!(
        "{}",
        logs::config_loaded(
            &args.config.display().to_string(),
            &config.services,
            config.telegram.chat_ids.len()
        )
    );
    let config = Arc::new(config);

    // 3. Initialize Infrastructure
    let executor = CommandExecutor::new(Duration::from_secs(config.commands.timeout));
    let services = Arc::new(ShellServiceControl::new(
        executor,
        config.commands.clone(),
        config.logs.clone(),
    ));

    let token = config
        .telegram
        .token
        .as_deref()
        .context("No bot token configured")?;
    let client = Arc::new(TelegramClient::new(
        &config.telegram.api_url,
        token,
        config.telegram.poll_timeout,
    )?);

    // 4. Event Loop (the router needs our username from getMe)
    let poll_timeout = config.telegram.poll_timeout;
    let bridge = async move {
        let me = telegram::connect(&client).await;
        let router = Arc::new(
            CommandRouter::new(config, services).with_bot_username(me.username),
        );
        telegram::run_polling(client, router, poll_timeout).await;
    };

    tokio::select! {
        _ = bridge => {}
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
            }
        }
    }

    tracing::info!("{}", logs::SHUTDOWN);
    Ok(())
}

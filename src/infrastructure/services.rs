//! # Shell Service Control
//!
//! Implements the `ServiceControl` trait by running the configured argv templates
//! (init script status check, `systemctl start/stop`, `tail`).

use crate::domain::config::{CommandsConfig, LogsConfig};
use crate::domain::traits::ServiceControl;
use crate::domain::types::LogStream;
use crate::infrastructure::tools::executor::CommandExecutor;
use anyhow::{Result, bail};
use async_trait::async_trait;

pub struct ShellServiceControl {
    executor: CommandExecutor,
    commands: CommandsConfig,
    logs: LogsConfig,
}

impl ShellServiceControl {
    pub fn new(executor: CommandExecutor, commands: CommandsConfig, logs: LogsConfig) -> Self {
        Self {
            executor,
            commands,
            logs,
        }
    }

    async fn control(&self, template: &[String], verb: &str, service: &str) -> Result<()> {
        let argv = render(template, &[("service", service)]);
        let output = self.executor.run(&argv).await?;
        if output.success() {
            tracing::info!("{verb} {service}: ok");
        } else {
            tracing::warn!(
                "{verb} {service} exited with {:?}: {}",
                output.code,
                output.stderr.trim()
            );
        }
        Ok(())
    }
}

/// Substitute `{key}` placeholders in every element of an argv template.
pub fn render(template: &[String], vars: &[(&str, &str)]) -> Vec<String> {
    template
        .iter()
        .map(|part| {
            vars.iter().fold(part.clone(), |acc, (key, value)| {
                acc.replace(&format!("{{{key}}}"), value)
            })
        })
        .collect()
}

#[async_trait]
impl ServiceControl for ShellServiceControl {
    async fn is_running(&self, service: &str) -> Result<bool> {
        let argv = render(&self.commands.status, &[("service", service)]);
        Ok(self.executor.run(&argv).await?.success())
    }

    async fn start(&self, service: &str) -> Result<()> {
        self.control(&self.commands.start, "start", service).await
    }

    async fn stop(&self, service: &str) -> Result<()> {
        self.control(&self.commands.stop, "stop", service).await
    }

    async fn tail_log(&self, service: &str, stream: LogStream, lines: usize) -> Result<String> {
        let path = self.logs.path_for(service, stream);
        let lines = lines.to_string();
        let argv = render(&self.commands.tail, &[("lines", &lines), ("path", &path)]);
        let output = self.executor.run(&argv).await?;
        if !output.success() {
            bail!(
                "Reading {path} failed ({:?}): {}",
                output.code,
                output.stderr.trim()
            );
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn control(commands: CommandsConfig, logs: LogsConfig) -> ShellServiceControl {
        ShellServiceControl::new(CommandExecutor::new(Duration::from_secs(5)), commands, logs)
    }

    #[test]
    fn test_render() {
        let out = render(
            &argv(&["/etc/init.d/{service}", "status", "{service}-x"]),
            &[("service", "lirc")],
        );
        assert_eq!(out, argv(&["/etc/init.d/lirc", "status", "lirc-x"]));
    }

    #[tokio::test]
    async fn test_status_uses_exit_code() {
        // Exit 0 only for "up".
        let commands = CommandsConfig {
            status: argv(&["sh", "-c", "test \"$0\" = up", "{service}"]),
            ..CommandsConfig::default()
        };
        let svc = control(commands, LogsConfig::default());
        assert!(svc.is_running("up").await.unwrap());
        assert!(!svc.is_running("down").await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_start_is_not_an_error() {
        let commands = CommandsConfig {
            start: argv(&["false"]),
            ..CommandsConfig::default()
        };
        let svc = control(commands, LogsConfig::default());
        assert!(svc.start("lirc").await.is_ok());
    }

    #[tokio::test]
    async fn test_tail_log() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lirc.log"), "1\n2\n3\n4\n5\n6\n7\n").unwrap();
        let logs = LogsConfig {
            stdout_path: format!("{}/{{service}}.log", dir.path().display()),
            stderr_path: format!("{}/{{service}}.err", dir.path().display()),
            ..LogsConfig::default()
        };
        let svc = control(CommandsConfig::default(), logs);

        let out = svc.tail_log("lirc", LogStream::Out, 3).await.unwrap();
        assert_eq!(out, "5\n6\n7\n");

        // Missing file makes tail exit non-zero.
        assert!(svc.tail_log("lirc", LogStream::Err, 3).await.is_err());
    }
}

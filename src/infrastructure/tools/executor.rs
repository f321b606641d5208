//! # Command Executor
//!
//! Runs external programs with an explicit argv (no shell), capturing exit status and output.
//! Enforces a per-command timeout so a hung init script cannot wedge the bot.

use anyhow::{Context as AnyhowContext, Result, bail};
use std::process::Stdio;
use std::time::Duration;

/// Result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes programs with a timeout.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    timeout: Duration,
}

impl CommandExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `argv[0]` with the remaining elements as arguments.
    /// A non-zero exit is returned as output, not as an error.
    pub async fn run(&self, argv: &[String]) -> Result<CommandOutput> {
        let Some((program, args)) = argv.split_first() else {
            bail!("Empty command");
        };

        tracing::debug!("Executing {:?}", argv);

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        let child = cmd
            .spawn()
            .with_context(|| format!("Failed to spawn `{program}`"))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .with_context(|| format!("`{program}` timed out after {:?}", self.timeout))?
            .with_context(|| format!("Failed to wait for `{program}`"))?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success() {
            tracing::debug!("{:?} exited with {:?}", argv, result.code);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let exec = CommandExecutor::new(Duration::from_secs(5));
        let out = exec.run(&argv(&["echo", "hello"])).await.unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "hello\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let exec = CommandExecutor::new(Duration::from_secs(5));
        let out = exec
            .run(&argv(&["sh", "-c", "echo oops >&2; exit 3"]))
            .await
            .unwrap();
        assert!(!out.success());
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stderr, "oops\n");
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let exec = CommandExecutor::new(Duration::from_secs(5));
        assert!(exec.run(&argv(&["/nonexistent/servbot-test"])).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_argv() {
        let exec = CommandExecutor::new(Duration::from_secs(5));
        assert!(exec.run(&[]).await.is_err());
    }

    #[tokio::test]
    async fn test_timeout() {
        let exec = CommandExecutor::new(Duration::from_millis(100));
        let err = exec.run(&argv(&["sleep", "5"])).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}

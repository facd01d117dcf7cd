//! Subprocess execution for the rbw CLI

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::error::VaultError;

/// Outcome of one command invocation.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit status code (0 for success)
    pub status: i32,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

impl CommandResult {
    /// Check if the command succeeded (exit code 0)
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs an external command and captures its output.
///
/// Running a command is fallible in two distinct ways: the process may fail
/// to spawn (an `Err`), or it may run and exit non-zero (an `Ok` result with
/// a failing status). Callers decide what a failing status means.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and wait for it to finish.
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult, VaultError>;
}

/// Real runner backed by `tokio::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult, VaultError> {
        debug!(program, ?args, "running command");

        let output = Command::new(program)
            .args(args)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .output()
            .await
            .map_err(|e| VaultError::Spawn(e.to_string()))?;

        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            error!(program, status, stderr = %stderr, "command failed");
        }

        Ok(CommandResult {
            status,
            stdout,
            stderr,
        })
    }
}

//! Subprocess execution for the billing CLI.

use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::error::ProcessError;

/// Captured result of one CLI invocation.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
    /// Exit status; -1 when the child was killed by a signal.
    pub exit_code: i32,
}

impl ProcessOutput {
    /// Stdout of a zero exit, otherwise [`ProcessError::NonZeroExit`] with
    /// the captured stderr.
    pub fn stdout_if_success(&self) -> Result<&str, ProcessError> {
        if self.exit_code == 0 {
            Ok(&self.stdout)
        } else {
            Err(ProcessError::NonZeroExit {
                code: self.exit_code,
                stderr: self.stderr.clone(),
            })
        }
    }
}

/// Spawns the billing CLI with a bounded run time.
///
/// The child inherits the parent environment, so credentials configured for
/// the billing CLI (profiles, `AWS_*` variables) apply unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new process runner.
    pub fn new() -> Self {
        Self
    }

    /// Runs `cmd` with `args` plus the `env` overrides, killing it after
    /// `timeout`.
    #[instrument(skip(self, args, env), fields(cmd = %cmd))]
    pub async fn run(
        &self,
        cmd: &str,
        args: &[&str],
        env: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let path = which::which(cmd).map_err(|_| {
            warn!("Command not found");
            ProcessError::NotFound(cmd.to_string())
        })?;

        let mut command = Command::new(path);
        command
            .args(args)
            .envs(env.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let started = Instant::now();
        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| {
                warn!(timeout = ?timeout, "Command timed out");
                ProcessError::Timeout(timeout)
            })??;

        let result = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        debug!(
            exit_code = result.exit_code,
            elapsed = ?started.elapsed(),
            stdout_len = result.stdout.len(),
            "Command completed"
        );

        Ok(result)
    }

    /// Returns true if `cmd` resolves on PATH.
    pub fn command_exists(&self, cmd: &str) -> bool {
        which::which(cmd).is_ok()
    }
}

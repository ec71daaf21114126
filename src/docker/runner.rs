//! Subprocess runner with a hard wall-clock timeout

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Captured output of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Error type for runner operations
#[derive(Debug)]
pub enum RunnerError {
    /// The program could not be started (missing binary, permissions)
    Spawn(std::io::Error),
    /// The process did not finish within the allowed time and was killed
    TimedOut(Duration),
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerError::Spawn(e) => write!(f, "Failed to start process: {}", e),
            RunnerError::TimedOut(d) => write!(f, "Timed out after {}s", d.as_secs()),
        }
    }
}

impl std::error::Error for RunnerError {}

impl From<std::io::Error> for RunnerError {
    fn from(e: std::io::Error) -> Self {
        RunnerError::Spawn(e)
    }
}

/// Runs one program to completion.
///
/// Implementations must give every invocation its own process and pipes,
/// and must enforce `limit` themselves.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        limit: Duration,
    ) -> Result<CommandOutput, RunnerError>;
}

/// Runner backed by real subprocesses
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        limit: Duration,
    ) -> Result<CommandOutput, RunnerError> {
        let start = std::time::Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Dropping the output future on timeout drops the child, which kills it
        let output = match timeout(limit, cmd.output()).await {
            Ok(result) => result?,
            Err(_) => {
                debug!(program, ?limit, "Process timed out");
                return Err(RunnerError::TimedOut(limit));
            }
        };

        debug!(
            program,
            exit_code = ?output.status.code(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Process finished"
        );

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}

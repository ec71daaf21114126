//! Read-only inspection tools for the diagnostic agent
//!
//! Every executor follows the same contract:
//! - validate the container id before touching the runtime
//! - run one bounded subprocess through the [`CommandRunner`]
//! - truncate what comes back to [`TOOL_RESULT_MAX`] chars
//! - never return `Err`: failures become [`ToolOutcome::Failed`] so the agent
//!   loop can hand them to the model as ordinary tool output

pub mod catalog;

pub use catalog::{is_exec_tool, tool_specs, ToolKind, ToolSpec};

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::docker::{validate_container_id, CommandOutput, CommandRunner, RunnerError};
use crate::security::{validate_command, CommandVerdict};

/// Maximum characters of tool output handed back to the model
pub const TOOL_RESULT_MAX: usize = 8000;

/// Default and hard maximum for `get_container_logs` tail
pub const DEFAULT_LOG_TAIL: u32 = 100;
pub const MAX_LOG_TAIL: u32 = 500;

const LIGHT_TIMEOUT: Duration = Duration::from_secs(5);
const HEAVY_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Tool ran and produced (possibly truncated) text
    Output(String),
    /// Tool could not do its job (bad id, runtime error, timeout)
    Failed(String),
    /// Command rejected by the safety validator; nothing was executed
    Blocked(String),
}

impl ToolOutcome {
    /// Text fed back to the model as the tool result
    pub fn content(&self) -> String {
        match self {
            ToolOutcome::Output(text) => text.clone(),
            ToolOutcome::Failed(msg) => format!("Error: {}", msg),
            ToolOutcome::Blocked(reason) => format!("Error: Command blocked: {}", reason),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, ToolOutcome::Output(_))
    }

    /// Short label for metrics
    pub fn label(&self) -> &'static str {
        match self {
            ToolOutcome::Output(_) => "ok",
            ToolOutcome::Failed(_) => "failed",
            ToolOutcome::Blocked(_) => "blocked",
        }
    }
}

/// Truncate `text` to `max` chars, appending a marker with the full length
pub fn truncate_output(text: &str, max: usize) -> String {
    let total = text.chars().count();
    if total <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max).collect();
    format!("{}\n... (truncated, {} chars total)", kept, total)
}

/// Resolve the `tail` argument: missing or unparseable → 100, else clamped to [1, 500]
pub fn clamp_log_tail(tail: Option<&Value>) -> u32 {
    let requested = match tail {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match requested {
        Some(n) => n.clamp(1, MAX_LOG_TAIL as i64) as u32,
        None => DEFAULT_LOG_TAIL,
    }
}

/// Executes catalog tools against a container runtime
pub struct ToolRegistry {
    runner: Arc<dyn CommandRunner>,
}

impl ToolRegistry {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Tool definitions to advertise to the model
    pub fn specs(&self) -> Vec<ToolSpec> {
        tool_specs()
    }

    /// Execute a tool by name with the model-supplied arguments
    pub async fn execute(&self, name: &str, args: &Value) -> ToolOutcome {
        let Some(kind) = ToolKind::from_name(name) else {
            return ToolOutcome::Failed(format!("Unknown tool: {}", name));
        };

        debug!(tool = name, "Executing tool");

        let outcome = match (kind, container_id(args)) {
            (ToolKind::ExecOnHost, _) => self.exec_on_host(args).await,
            (_, None) => ToolOutcome::Failed("Invalid container ID".to_string()),
            (ToolKind::ContainerLogs, Some(id)) => {
                self.logs(id, clamp_log_tail(args.get("tail"))).await
            }
            (ToolKind::ContainerInspect, Some(id)) => self.inspect(id).await,
            (ToolKind::ContainerTop, Some(id)) => self.top(id).await,
            (ToolKind::ContainerDiff, Some(id)) => self.diff(id).await,
            (ToolKind::ContainerEvents, Some(id)) => self.events(id).await,
            (ToolKind::ContainerHealthLog, Some(id)) => self.health_log(id).await,
            (ToolKind::ExecInContainer, Some(id)) => self.exec_in_container(id, args).await,
        };

        // Uniform empty-output convention across tools
        match outcome {
            ToolOutcome::Output(text) if text.is_empty() => {
                ToolOutcome::Output("(empty output)".to_string())
            }
            other => other,
        }
    }

    async fn docker(&self, args: &[&str], limit: Duration) -> Result<CommandOutput, RunnerError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run("docker", &args, limit).await
    }

    /// Run a docker subcommand; `None` on spawn failure, timeout or non-zero exit
    async fn docker_stdout(&self, args: &[&str], limit: Duration) -> Option<String> {
        match self.docker(args, limit).await {
            Ok(output) if output.success() => Some(output.stdout.trim().to_string()),
            Ok(output) => {
                debug!(exit_code = ?output.exit_code, stderr = %output.stderr.trim(), "docker command failed");
                None
            }
            Err(e) => {
                debug!(error = %e, "docker command did not complete");
                None
            }
        }
    }

    async fn logs(&self, id: &str, tail: u32) -> ToolOutcome {
        let tail = tail.to_string();
        // docker writes container stderr to our stderr, so both streams are logs
        match self
            .docker(&["logs", "--tail", tail.as_str(), "--timestamps", id], HEAVY_TIMEOUT)
            .await
        {
            Ok(output) => {
                let combined = format!("{}{}", output.stdout, output.stderr);
                let combined = combined.trim();
                if combined.is_empty() {
                    ToolOutcome::Output("(no logs)".to_string())
                } else {
                    ToolOutcome::Output(truncate_output(combined, TOOL_RESULT_MAX))
                }
            }
            Err(_) => ToolOutcome::Failed("Failed to get logs (container may not exist)".to_string()),
        }
    }

    async fn inspect(&self, id: &str) -> ToolOutcome {
        match self.docker_stdout(&["inspect", id], LIGHT_TIMEOUT).await {
            Some(out) => ToolOutcome::Output(truncate_output(&out, TOOL_RESULT_MAX)),
            None => ToolOutcome::Failed("Failed to inspect container".to_string()),
        }
    }

    async fn top(&self, id: &str) -> ToolOutcome {
        match self.docker_stdout(&["top", id], LIGHT_TIMEOUT).await {
            Some(out) => ToolOutcome::Output(truncate_output(&out, TOOL_RESULT_MAX)),
            None => ToolOutcome::Failed(
                "Failed to get process list (container may not be running)".to_string(),
            ),
        }
    }

    async fn diff(&self, id: &str) -> ToolOutcome {
        match self.docker_stdout(&["diff", id], LIGHT_TIMEOUT).await {
            Some(out) if out.is_empty() => {
                ToolOutcome::Output("(no filesystem changes)".to_string())
            }
            Some(out) => ToolOutcome::Output(truncate_output(&out, TOOL_RESULT_MAX)),
            None => ToolOutcome::Failed("Failed to get filesystem diff".to_string()),
        }
    }

    async fn events(&self, id: &str) -> ToolOutcome {
        let filter = format!("container={}", id);
        let args = [
            "events",
            "--filter",
            filter.as_str(),
            "--since",
            "10m",
            "--until",
            "now",
            "--format",
            "{{.Time}} {{.Action}} {{.Actor.Attributes.exitCode}}",
        ];
        match self.docker_stdout(&args, HEAVY_TIMEOUT).await {
            Some(out) if !out.is_empty() => {
                ToolOutcome::Output(truncate_output(&out, TOOL_RESULT_MAX))
            }
            _ => ToolOutcome::Output("(no recent events)".to_string()),
        }
    }

    async fn health_log(&self, id: &str) -> ToolOutcome {
        let args = ["inspect", "--format", "{{json .State.Health}}", id];
        match self.docker_stdout(&args, LIGHT_TIMEOUT).await {
            Some(out) if !matches!(out.as_str(), "" | "null" | "<nil>") => {
                ToolOutcome::Output(truncate_output(&out, TOOL_RESULT_MAX))
            }
            _ => ToolOutcome::Output("(no health check configured)".to_string()),
        }
    }

    async fn exec_in_container(&self, id: &str, args: &Value) -> ToolOutcome {
        let command = args.get("command").and_then(Value::as_str).unwrap_or("");
        if let CommandVerdict::Rejected(reason) = validate_command(command) {
            return ToolOutcome::Blocked(reason);
        }
        let argv = vec![
            "exec".to_string(),
            id.to_string(),
            "sh".to_string(),
            "-c".to_string(),
            command.to_string(),
        ];
        exec_outcome(self.runner.run("docker", &argv, HEAVY_TIMEOUT).await)
    }

    async fn exec_on_host(&self, args: &Value) -> ToolOutcome {
        let command = args.get("command").and_then(Value::as_str).unwrap_or("");
        if let CommandVerdict::Rejected(reason) = validate_command(command) {
            return ToolOutcome::Blocked(reason);
        }
        let argv = vec!["-c".to_string(), command.to_string()];
        exec_outcome(self.runner.run("sh", &argv, HEAVY_TIMEOUT).await)
    }
}

fn container_id(args: &Value) -> Option<&str> {
    args.get("container_id")
        .and_then(Value::as_str)
        .filter(|id| validate_container_id(id))
}

/// Shape the result of an exec command.
///
/// A failing command that still printed something is reported as output
/// with its stderr appended, since partial output is often the useful part.
fn exec_outcome(result: Result<CommandOutput, RunnerError>) -> ToolOutcome {
    match result {
        Ok(output) if output.success() => {
            ToolOutcome::Output(truncate_output(&output.stdout, TOOL_RESULT_MAX))
        }
        Ok(output) => {
            let stderr = if output.stderr.trim().is_empty() {
                match output.exit_code {
                    Some(code) => format!("Command exited with status {}", code),
                    None => "Command terminated by signal".to_string(),
                }
            } else {
                output.stderr
            };
            if output.stdout.is_empty() {
                ToolOutcome::Failed(truncate_output(&stderr, TOOL_RESULT_MAX))
            } else {
                // One cap for the combined text
                let combined = format!("{}\n\nSTDERR: {}", output.stdout, stderr);
                ToolOutcome::Output(truncate_output(&combined, TOOL_RESULT_MAX))
            }
        }
        Err(e) => ToolOutcome::Failed(e.to_string()),
    }
}

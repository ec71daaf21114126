//! Agent Controller - the bounded diagnostic loop
//!
//! The AgentController drives one investigation: it asks the provider for
//! the next step, runs the requested tools, feeds the results back and stops
//! on a diagnosis, a provider failure or one of three budgets (iterations,
//! wall-clock time, exec calls). Everything it does is reported as events on
//! the session.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, info_span, warn, Instrument};

use super::diagnosis::{has_marker, max_iterations_text, timeout_text};
use super::events::{AgentEvent, EndStats, Step};
use super::prompts::{build_user_prompt, InvestigationRequest, SYSTEM_PROMPT};
use super::sessions::{SessionStatus, SessionStore};
use crate::metrics::{AGENT_ITERATIONS, AGENT_TOOL_CALLS, INVESTIGATIONS, LLM_CALL_DURATION, TOOL_DURATION};
use crate::providers::{ProviderAdapter, ToolCall, ToolResult};
use crate::tools::{ToolKind, ToolOutcome, ToolRegistry};

/// Diagnosis text used when the model stops without one
pub const NO_DIAGNOSIS_TEXT: &str = "Agent could not determine a diagnosis.";

/// Budgets for one investigation
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum provider calls before giving up
    pub max_iterations: usize,
    /// Wall-clock budget measured from loop start
    pub total_timeout: Duration,
    /// Maximum exec tool invocations per investigation
    pub max_exec_calls: usize,
    /// Characters of each tool result shown in `tool_result` events
    pub tool_result_preview: usize,
    /// HTTP timeout for a single provider call
    pub provider_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            total_timeout: Duration::from_secs(60),
            max_exec_calls: 5,
            tool_result_preview: 500,
            provider_timeout: Duration::from_secs(120),
        }
    }
}

/// How an investigation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestigationOutcome {
    /// Model produced a marked diagnosis
    Diagnosis,
    /// Model finished without the diagnosis marker
    VoluntaryStop,
    MaxIterations,
    Timeout,
    ProviderError,
}

impl InvestigationOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            InvestigationOutcome::Diagnosis => "diagnosis",
            InvestigationOutcome::VoluntaryStop => "voluntary_stop",
            InvestigationOutcome::MaxIterations => "max_iterations",
            InvestigationOutcome::Timeout => "timeout",
            InvestigationOutcome::ProviderError => "provider_error",
        }
    }
}

/// Result of an agent run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestigationSummary {
    pub outcome: InvestigationOutcome,
    pub iterations: usize,
    /// Exec tool invocations that reached the runtime
    pub exec_calls: usize,
}

/// Drives one investigation to completion
pub struct AgentController {
    provider: Box<dyn ProviderAdapter>,
    tools: Arc<ToolRegistry>,
    store: Arc<SessionStore>,
    config: AgentConfig,
}

impl AgentController {
    pub fn new(
        provider: Box<dyn ProviderAdapter>,
        tools: Arc<ToolRegistry>,
        store: Arc<SessionStore>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            store,
            config,
        }
    }

    /// Run the loop for an existing session.
    ///
    /// Always leaves the session terminal with `end` as its last event. The
    /// provider and its conversation are dropped when this returns.
    pub async fn run(mut self, session_id: &str, request: &InvestigationRequest) -> InvestigationSummary {
        let root_span = info_span!(
            "investigation",
            session_id = %session_id,
            container = %request.container.name,
            provider = %self.provider.provider_name(),
            model = %self.provider.model(),
            otel.name = "investigation"
        );

        async {
            let summary = self.investigate(session_id, request).await;
            INVESTIGATIONS.with_label_values(&[summary.outcome.label()]).inc();
            AGENT_ITERATIONS.observe(summary.iterations as f64);
            info!(
                outcome = summary.outcome.label(),
                iterations = summary.iterations,
                exec_calls = summary.exec_calls,
                "Investigation finished"
            );
            summary
        }
        .instrument(root_span)
        .await
    }

    async fn investigate(&mut self, session_id: &str, request: &InvestigationRequest) -> InvestigationSummary {
        let store = Arc::clone(&self.store);
        let max = self.config.max_iterations;

        store.set_status(session_id, SessionStatus::Running);
        store.emit(
            session_id,
            AgentEvent::Start {
                provider: self.provider.provider_name().to_string(),
                model: self.provider.model().to_string(),
                container: request.container.name.clone(),
            },
        );
        info!(container_id = %request.container.id, "Starting investigation");

        self.provider
            .build_initial_messages(SYSTEM_PROMPT, &build_user_prompt(request));

        let started = Instant::now();
        let mut iterations = 0;
        let mut exec_calls = 0;
        let mut timed_out = false;

        while iterations < max {
            if started.elapsed() > self.config.total_timeout {
                warn!(iterations, "Investigation timeout");
                store.emit(
                    session_id,
                    Step::Warning {
                        content: format!(
                            "Investigation timeout ({}s). Producing diagnosis with available data.",
                            self.config.total_timeout.as_secs()
                        ),
                    },
                );
                timed_out = true;
                break;
            }

            iterations += 1;
            store.emit(
                session_id,
                Step::Thinking {
                    content: format!("Iteration {}/{}", iterations, max),
                },
            );

            let llm_span = info_span!(
                "llm_call",
                iteration = iterations,
                provider = %self.provider.provider_name(),
                model = %self.provider.model(),
                otel.name = "llm_call"
            );
            let call_start = Instant::now();
            let result = self.provider.call().instrument(llm_span).await;
            let call_secs = call_start.elapsed().as_secs_f64();
            LLM_CALL_DURATION
                .with_label_values(&[self.provider.provider_name()])
                .observe(call_secs);

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    error!(iteration = iterations, error = %e, "Provider call failed");
                    store.emit(session_id, AgentEvent::error(format!("LLM call failed: {}", e)));
                    store.finish(
                        session_id,
                        SessionStatus::Error,
                        AgentEvent::End(Some(EndStats {
                            iterations,
                            exec_calls,
                        })),
                    );
                    return InvestigationSummary {
                        outcome: InvestigationOutcome::ProviderError,
                        iterations,
                        exec_calls,
                    };
                }
            };
            debug!(
                iteration = iterations,
                duration_ms = call_secs * 1000.0,
                tool_calls = response.tool_calls.len(),
                done = response.done,
                "LLM call completed"
            );

            let content = response.content.filter(|c| !c.trim().is_empty());
            if let Some(text) = &content {
                store.emit(
                    session_id,
                    Step::Reasoning {
                        content: text.clone(),
                    },
                );
            }

            if response.done {
                let (raw, outcome) = match content {
                    Some(text) if has_marker(&text) => (text, InvestigationOutcome::Diagnosis),
                    Some(text) => (text, InvestigationOutcome::VoluntaryStop),
                    None => (NO_DIAGNOSIS_TEXT.to_string(), InvestigationOutcome::VoluntaryStop),
                };
                if outcome == InvestigationOutcome::VoluntaryStop {
                    warn!(iteration = iterations, "Model stopped without a structured diagnosis");
                }
                return self.conclude(session_id, &raw, outcome, iterations, exec_calls);
            }

            if response.tool_calls.is_empty() {
                continue;
            }

            let mut results = Vec::with_capacity(response.tool_calls.len());
            for call in &response.tool_calls {
                let content = self.run_tool(session_id, call, &mut exec_calls).await;
                results.push(ToolResult {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    content,
                });
            }
            self.provider.append_tool_results(&results);
        }

        let (raw, outcome) = if timed_out {
            (
                timeout_text(self.config.total_timeout.as_secs()),
                InvestigationOutcome::Timeout,
            )
        } else {
            warn!(iterations, "Max iterations reached");
            store.emit(
                session_id,
                Step::Warning {
                    content: format!("Max iterations ({}) reached.", max),
                },
            );
            (max_iterations_text(), InvestigationOutcome::MaxIterations)
        };
        self.conclude(session_id, &raw, outcome, iterations, exec_calls)
    }

    /// Emit the diagnosis and close the session successfully
    fn conclude(
        &self,
        session_id: &str,
        raw: &str,
        outcome: InvestigationOutcome,
        iterations: usize,
        exec_calls: usize,
    ) -> InvestigationSummary {
        self.store.emit(session_id, AgentEvent::diagnosis(raw));
        self.store.finish(
            session_id,
            SessionStatus::Done,
            AgentEvent::End(Some(EndStats {
                iterations,
                exec_calls,
            })),
        );
        InvestigationSummary {
            outcome,
            iterations,
            exec_calls,
        }
    }

    /// Execute one tool call under the exec budget and return its result text
    async fn run_tool(&self, session_id: &str, call: &ToolCall, exec_calls: &mut usize) -> String {
        let kind = ToolKind::from_name(&call.name);
        let is_exec = kind.is_some_and(|k| k.is_exec());
        let metric_name = kind.map(|k| k.name()).unwrap_or("unknown");

        if is_exec && *exec_calls >= self.config.max_exec_calls {
            let limit = self.config.max_exec_calls;
            warn!(tool = %call.name, limit, "Exec budget exhausted");
            self.store.emit(
                session_id,
                Step::Blocked {
                    content: format!("Exec limit reached ({}). Skipping {}.", limit, call.name),
                },
            );
            AGENT_TOOL_CALLS
                .with_label_values(&[metric_name, "budget_exhausted"])
                .inc();
            return format!(
                "Error: Exec call limit reached ({}). Use non-exec tools or produce your diagnosis.",
                limit
            );
        }

        self.store.emit(
            session_id,
            Step::ToolCall {
                tool: call.name.clone(),
                arguments: call.arguments.clone(),
            },
        );

        let tool_span = info_span!("tool_call", tool = %call.name, otel.name = "tool_call");
        let start = Instant::now();
        let outcome = self
            .tools
            .execute(&call.name, &call.arguments)
            .instrument(tool_span)
            .await;
        TOOL_DURATION
            .with_label_values(&[metric_name])
            .observe(start.elapsed().as_secs_f64());
        AGENT_TOOL_CALLS
            .with_label_values(&[metric_name, outcome.label()])
            .inc();

        // Safety rejections never reach the runtime and do not use the budget
        if is_exec && !matches!(outcome, ToolOutcome::Blocked(_)) {
            *exec_calls += 1;
        }

        match (&outcome, kind) {
            (ToolOutcome::Blocked(reason), _) => {
                info!(tool = %call.name, reason = %reason, "Command blocked");
                self.store.emit(
                    session_id,
                    Step::Blocked {
                        content: format!("Command blocked: {}", reason),
                    },
                );
            }
            (ToolOutcome::Failed(msg), None) => {
                warn!(tool = %call.name, "Model requested unknown tool");
                self.store.emit(session_id, Step::Error { content: msg.clone() });
            }
            (ToolOutcome::Failed(msg), Some(_)) => {
                debug!(tool = %call.name, error = %msg, "Tool failed");
            }
            (ToolOutcome::Output(_), _) => {}
        }

        let content = outcome.content();
        let length = content.chars().count();
        self.store.emit(
            session_id,
            Step::ToolResult {
                tool: call.name.clone(),
                preview: content.chars().take(self.config.tool_result_preview).collect(),
                length,
                error: outcome.is_error(),
            },
        );
        content
    }
}

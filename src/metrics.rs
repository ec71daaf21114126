//! Prometheus metrics for the diagnostic agent
//!
//! All metrics live in the default registry and are rendered by
//! `GET /metrics` through [`render`].

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter, register_int_counter_vec,
    register_int_gauge, Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec, IntGauge,
    TextEncoder,
};

lazy_static! {
    // ─────────────────────────────────────────────────────────────────────────────
    // Investigation Metrics
    // ─────────────────────────────────────────────────────────────────────────────

    /// Investigations accepted by the service.
    pub static ref INVESTIGATIONS_STARTED: IntCounter = register_int_counter!(
        "vaultdock_investigations_started_total",
        "Investigations started"
    ).expect("failed to register INVESTIGATIONS_STARTED metric");

    /// Finished investigations by how they ended.
    ///
    /// Labels:
    /// - outcome: diagnosis, voluntary_stop, max_iterations, timeout,
    ///   config_error, provider_error, panic
    pub static ref INVESTIGATIONS: IntCounterVec = register_int_counter_vec!(
        "vaultdock_investigations_total",
        "Finished investigations by outcome",
        &["outcome"]
    ).expect("failed to register INVESTIGATIONS metric");

    /// Loop iterations used per investigation.
    pub static ref AGENT_ITERATIONS: Histogram = register_histogram!(
        "vaultdock_agent_iterations",
        "Agent loop iterations per investigation",
        vec![1.0, 2.0, 3.0, 5.0, 8.0, 10.0, 15.0]
    ).expect("failed to register AGENT_ITERATIONS metric");

    /// Tool calls requested by the model.
    ///
    /// Labels:
    /// - tool: tool name as requested
    /// - outcome: ok, failed, blocked, budget_exhausted
    pub static ref AGENT_TOOL_CALLS: IntCounterVec = register_int_counter_vec!(
        "vaultdock_agent_tool_calls_total",
        "Tool calls by tool and outcome",
        &["tool", "outcome"]
    ).expect("failed to register AGENT_TOOL_CALLS metric");

    // ─────────────────────────────────────────────────────────────────────────────
    // Latency Metrics
    // ─────────────────────────────────────────────────────────────────────────────

    pub static ref LLM_CALL_DURATION: HistogramVec = register_histogram_vec!(
        "vaultdock_llm_call_duration_seconds",
        "Duration of one provider call",
        &["provider"],
        vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 40.0, 60.0, 120.0]
    ).expect("failed to register LLM_CALL_DURATION metric");

    pub static ref TOOL_DURATION: HistogramVec = register_histogram_vec!(
        "vaultdock_tool_duration_seconds",
        "Duration of one tool execution",
        &["tool"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).expect("failed to register TOOL_DURATION metric");

    // ─────────────────────────────────────────────────────────────────────────────
    // Session Metrics
    // ─────────────────────────────────────────────────────────────────────────────

    /// Sessions held in memory (running or waiting for the reaper).
    pub static ref SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        "vaultdock_sessions_active",
        "Sessions currently held in the session store"
    ).expect("failed to register SESSIONS_ACTIVE metric");

    /// Open SSE streams.
    pub static ref STREAM_SUBSCRIBERS: IntGauge = register_int_gauge!(
        "vaultdock_stream_subscribers",
        "Open investigation event streams"
    ).expect("failed to register STREAM_SUBSCRIBERS metric");
}

/// Render the default registry in the Prometheus text format
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).to_string()
}

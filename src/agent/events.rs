//! Investigation events
//!
//! An [`AgentEvent`] is what the loop reports. When the session store
//! appends it, it becomes a [`RecordedEvent`] whose JSON payload (with the
//! `ts` field) is serialized exactly once, so every replay sends the same
//! bytes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use super::diagnosis::Diagnosis;

/// Event type, also the SSE event name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Step,
    Diagnosis,
    End,
    Error,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Step => "step",
            EventKind::Diagnosis => "diagnosis",
            EventKind::End => "end",
            EventKind::Error => "error",
        }
    }
}

/// Progress report inside a `step` event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Thinking { content: String },
    Reasoning { content: String },
    ToolCall { tool: String, arguments: Value },
    ToolResult {
        tool: String,
        preview: String,
        /// Length of the full result in chars
        length: usize,
        error: bool,
    },
    Blocked { content: String },
    Warning { content: String },
    Error { content: String },
}

/// Counters reported by the final `end` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndStats {
    pub iterations: usize,
    pub exec_calls: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    Start {
        provider: String,
        model: String,
        container: String,
    },
    Step(Step),
    Diagnosis(Diagnosis),
    /// `None` on paths that never entered the loop
    End(Option<EndStats>),
    Error { message: String },
}

impl AgentEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AgentEvent::Start { .. } => EventKind::Start,
            AgentEvent::Step(_) => EventKind::Step,
            AgentEvent::Diagnosis(_) => EventKind::Diagnosis,
            AgentEvent::End(_) => EventKind::End,
            AgentEvent::Error { .. } => EventKind::Error,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        AgentEvent::Error {
            message: message.into(),
        }
    }

    pub fn diagnosis(raw: &str) -> Self {
        AgentEvent::Diagnosis(Diagnosis::parse(raw))
    }

    /// Event data as a JSON object, without the timestamp
    pub fn data(&self) -> Value {
        match self {
            AgentEvent::Start {
                provider,
                model,
                container,
            } => json!({ "provider": provider, "model": model, "container": container }),
            AgentEvent::Step(step) => serde_json::to_value(step).unwrap_or_else(|_| json!({})),
            AgentEvent::Diagnosis(diagnosis) => json!({
                "raw": diagnosis.raw,
                "diagnosis": diagnosis,
            }),
            AgentEvent::End(Some(stats)) => {
                serde_json::to_value(stats).unwrap_or_else(|_| json!({}))
            }
            AgentEvent::End(None) => json!({}),
            AgentEvent::Error { message } => json!({ "message": message }),
        }
    }
}

impl From<Step> for AgentEvent {
    fn from(step: Step) -> Self {
        AgentEvent::Step(step)
    }
}

/// An event as stored in a session and sent to subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub kind: EventKind,
    /// Event data plus `ts` (ms since epoch), serialized at append time
    pub payload: String,
    pub timestamp: DateTime<Utc>,
}

impl RecordedEvent {
    pub fn record(event: &AgentEvent, timestamp: DateTime<Utc>) -> Self {
        let mut data = event.data();
        if let Value::Object(map) = &mut data {
            map.insert("ts".to_string(), json!(timestamp.timestamp_millis()));
        }
        Self {
            kind: event.kind(),
            payload: data.to_string(),
            timestamp,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == EventKind::End
    }

    /// Parsed payload; used by tests and log output
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.payload).unwrap_or(Value::Null)
    }
}

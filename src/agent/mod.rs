//! Diagnostic agent
//!
//! Runs bounded, tool-calling investigations of a single container and
//! streams their progress as events.
//!
//! # Architecture
//!
//! ```text
//! POST investigate → AgentService.start_investigation()
//!                         │  creates Session, returns id
//!                         ▼
//!                  tokio::spawn(AgentController.run)
//!                         │
//!          ┌──────────────┴───────────────┐
//!          ▼                              ▼
//!   ProviderAdapter.call()         ToolRegistry.execute()
//!   (OpenAI / Anthropic)           (docker, safety-checked exec)
//!          └──────────────┬───────────────┘
//!                         ▼
//!               SessionStore.emit(event)
//!                         │  buffered + fanned out
//!                         ▼
//!               SSE subscribers (replay, then live)
//! ```

pub mod controller;
pub mod diagnosis;
pub mod events;
pub mod prompts;
pub mod service;
pub mod sessions;

pub use controller::{AgentConfig, AgentController, InvestigationOutcome, InvestigationSummary};
pub use diagnosis::{Diagnosis, Severity};
pub use events::{AgentEvent, EndStats, EventKind, RecordedEvent, Step};
pub use prompts::{ContainerSubject, InvestigationRequest, SiblingContainer, StackContext};
pub use service::{AgentService, AgentStatus};
pub use sessions::{
    ReaperHandle, SessionError, SessionStatus, SessionStore, Subscription, REAP_INTERVAL,
    SESSION_TTL,
};

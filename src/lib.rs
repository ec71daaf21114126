//! Vaultdock - container-fleet dashboard backend with an LLM diagnostic agent
//!
//! The agent investigates a failing container by calling a fixed set of
//! read-only Docker tools through an OpenAI or Anthropic model, within hard
//! budgets, and streams its progress to the dashboard over SSE.
//!
//! # Modules
//!
//! - `agent` - Agent loop, sessions, events, prompts and diagnosis parsing
//! - `providers` - OpenAI Responses and Anthropic Messages adapters
//! - `tools` - Tool catalog and Docker-backed executors
//! - `docker` - Subprocess runner and container id validation
//! - `security` - Command safety validation for exec tools
//! - `dashboard` - axum HTTP API (status, investigate, SSE stream, metrics)
//! - `config` - Environment configuration and provider selection
//! - `metrics` - Prometheus metrics for observability
//! - `tracing` - Console logging and OpenTelemetry export
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use vaultdock::{AgentConfig, AgentService, SessionStore, SystemRunner, ToolRegistry};
//!
//! let store = Arc::new(SessionStore::new());
//! let tools = Arc::new(ToolRegistry::new(Arc::new(SystemRunner::new())));
//! let agent = AgentService::new(store, tools, provider_config, AgentConfig::default());
//!
//! // Returns immediately; events accumulate in the session
//! let session_id = agent.start_investigation(request);
//! ```

pub mod agent;
pub mod config;
pub mod dashboard;
pub mod docker;
pub mod metrics;
pub mod providers;
pub mod security;
pub mod tools;
pub mod tracing;

// Re-export commonly used types at crate root for convenience
pub use agent::{AgentConfig, AgentService, InvestigationRequest, SessionStore};
pub use config::AppConfig;
pub use docker::{CommandRunner, SystemRunner};
pub use providers::{Provider, ProviderAdapter, ProviderConfig, ProviderKind};
pub use tools::ToolRegistry;

//! LLM provider adapters
//!
//! The agent loop talks to every backend through [`ProviderAdapter`]. Each
//! adapter keeps its conversation in the provider's own wire format and
//! echoes every turn back on the next call, so nothing is lost converting
//! between formats. Only the [`NormalizedResponse`] leaves the adapter.
//!
//! ```text
//!               ┌──────────────────────────────┐
//!  AgentLoop ──►│ Provider (closed enum)       │
//!               │  ├─ OpenAi    /v1/responses  │  output items: message | function_call
//!               │  └─ Anthropic /v1/messages   │  content blocks + stop_reason
//!               └──────────────┬───────────────┘
//!                              ▼
//!        NormalizedResponse { content, tool_calls, done }
//! ```

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicAdapter;
pub use openai::OpenAiAdapter;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::tools::ToolSpec;

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCall {
    /// Provider-assigned id, echoed back with the result
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Output of one tool call, fed back to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub id: String,
    pub name: String,
    pub content: String,
}

/// One model turn, reduced to what the agent loop needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedResponse {
    /// Concatenated text output, `None` if the turn had no text
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    /// Backend finished its turn and asked for no tools
    pub done: bool,
}

/// Supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "anthropic" => Some(ProviderKind::Anthropic),
            _ => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => openai::DEFAULT_MODEL,
            ProviderKind::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved `{provider, model, credential}` triple for one session
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    /// API base override, e.g. for a proxy
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Error type for provider operations
#[derive(Debug)]
pub enum ProviderError {
    /// No credential for the selected provider
    MissingCredential(ProviderKind),
    /// HTTP transport failure (connect, timeout, TLS)
    Request(reqwest::Error),
    /// Provider answered with a non-success status
    Api { status: u16, message: String },
    /// Response body was not valid JSON
    Parse(serde_json::Error),
    /// Valid JSON that does not have the expected shape
    MalformedResponse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::MissingCredential(kind) => {
                write!(f, "Missing API key for provider {}", kind)
            }
            ProviderError::Request(e) => write!(f, "Request error: {}", e),
            ProviderError::Api { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            ProviderError::Parse(e) => write!(f, "Parse error: {}", e),
            ProviderError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Request(e)
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Parse(e)
    }
}

/// One LLM backend holding one conversation.
///
/// An adapter is owned by exactly one agent loop and is dropped with it.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider_name(&self) -> &str;

    fn model(&self) -> &str;

    /// Reset the conversation to a system prompt and one user message
    fn build_initial_messages(&mut self, system_prompt: &str, user_prompt: &str);

    /// Send the conversation, record the reply in it, and normalize the reply
    async fn call(&mut self) -> Result<NormalizedResponse, ProviderError>;

    /// Append one batch of tool results, preserving call ids
    fn append_tool_results(&mut self, results: &[ToolResult]);
}

/// Closed set of concrete backends
#[derive(Debug)]
pub enum Provider {
    OpenAi(OpenAiAdapter),
    Anthropic(AnthropicAdapter),
}

impl Provider {
    /// Build the adapter for a resolved provider configuration.
    ///
    /// Fails before any network traffic if the credential is empty.
    pub fn from_config(
        config: &ProviderConfig,
        tools: &[ToolSpec],
        request_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential(config.provider));
        }
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;

        Ok(match config.provider {
            ProviderKind::OpenAi => Provider::OpenAi(OpenAiAdapter::new(client, config, tools)),
            ProviderKind::Anthropic => {
                Provider::Anthropic(AnthropicAdapter::new(client, config, tools))
            }
        })
    }
}

#[async_trait]
impl ProviderAdapter for Provider {
    fn provider_name(&self) -> &str {
        match self {
            Provider::OpenAi(a) => a.provider_name(),
            Provider::Anthropic(a) => a.provider_name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Provider::OpenAi(a) => a.model(),
            Provider::Anthropic(a) => a.model(),
        }
    }

    fn build_initial_messages(&mut self, system_prompt: &str, user_prompt: &str) {
        match self {
            Provider::OpenAi(a) => a.build_initial_messages(system_prompt, user_prompt),
            Provider::Anthropic(a) => a.build_initial_messages(system_prompt, user_prompt),
        }
    }

    async fn call(&mut self) -> Result<NormalizedResponse, ProviderError> {
        match self {
            Provider::OpenAi(a) => a.call().await,
            Provider::Anthropic(a) => a.call().await,
        }
    }

    fn append_tool_results(&mut self, results: &[ToolResult]) {
        match self {
            Provider::OpenAi(a) => a.append_tool_results(results),
            Provider::Anthropic(a) => a.append_tool_results(results),
        }
    }
}

/// Pull a human-readable message out of an error body (`{"error":{"message":..}}`)
pub(crate) fn api_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.chars().take(200).collect());
    ProviderError::Api {
        status: status.as_u16(),
        message,
    }
}

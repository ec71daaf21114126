//! Anthropic Messages API adapter
//!
//! Assistant turns are appended as their raw content blocks. One batch of
//! tool results goes back as a single user message of `tool_result` blocks.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{api_error, NormalizedResponse, ProviderAdapter, ProviderConfig, ProviderError, ToolCall, ToolResult};
use crate::tools::ToolSpec;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const API_VERSION: &str = "2023-06-01";
pub const MAX_TOKENS: u32 = 4096;

#[derive(Debug)]
pub struct AnthropicAdapter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    tools: Vec<Value>,
    system: String,
    messages: Vec<Value>,
}

impl AnthropicAdapter {
    pub fn new(client: reqwest::Client, config: &ProviderConfig, tools: &[ToolSpec]) -> Self {
        let base = config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/v1/messages", base),
            tools: tools.iter().map(to_anthropic_tool).collect(),
            system: String::new(),
            messages: Vec::new(),
        }
    }

    fn request_body(&self) -> Value {
        json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": self.system,
            "messages": self.messages,
            "tools": self.tools,
        })
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_initial_messages(&mut self, system_prompt: &str, user_prompt: &str) {
        self.system = system_prompt.to_string();
        self.messages = vec![json!({ "role": "user", "content": user_prompt })];
    }

    async fn call(&mut self) -> Result<NormalizedResponse, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.request_body())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let raw: Value = serde_json::from_str(&body)?;
        let (blocks, normalized) = parse_response(&raw)?;
        debug!(
            blocks = blocks.len(),
            tool_calls = normalized.tool_calls.len(),
            done = normalized.done,
            "Anthropic response"
        );
        self.messages
            .push(json!({ "role": "assistant", "content": blocks }));
        Ok(normalized)
    }

    fn append_tool_results(&mut self, results: &[ToolResult]) {
        // The API rejects empty content arrays
        if results.is_empty() {
            return;
        }
        let blocks: Vec<Value> = results
            .iter()
            .map(|r| {
                json!({
                    "type": "tool_result",
                    "tool_use_id": r.id,
                    "content": r.content,
                })
            })
            .collect();
        self.messages.push(json!({ "role": "user", "content": blocks }));
    }
}

fn to_anthropic_tool(spec: &ToolSpec) -> Value {
    json!({
        "name": spec.name,
        "description": spec.description,
        "input_schema": spec.parameters,
    })
}

#[derive(Debug, Deserialize)]
struct MessagesBody {
    content: Vec<Value>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

/// Split a Messages API body into the assistant blocks to echo back and the normalized turn
pub fn parse_response(raw: &Value) -> Result<(Vec<Value>, NormalizedResponse), ProviderError> {
    let body: MessagesBody = serde_json::from_value(raw.clone())
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for block in &body.content {
        match serde_json::from_value::<ContentBlock>(block.clone()) {
            Ok(ContentBlock::Text { text: chunk }) => text.push_str(&chunk),
            Ok(ContentBlock::ToolUse { id, name, input }) => tool_calls.push(ToolCall {
                id,
                name,
                arguments: if input.is_null() { json!({}) } else { input },
            }),
            Ok(ContentBlock::Other) | Err(_) => {}
        }
    }

    let done = body.stop_reason.as_deref() == Some("end_turn") && tool_calls.is_empty();
    let normalized = NormalizedResponse {
        content: (!text.is_empty()).then_some(text),
        tool_calls,
        done,
    };
    Ok((body.content, normalized))
}

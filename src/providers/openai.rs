//! OpenAI Responses API adapter
//!
//! The conversation is the `input` item list. Every output item the model
//! returns (messages, reasoning, function calls) is appended to it verbatim,
//! and tool results go back as `function_call_output` items keyed by
//! `call_id`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{api_error, NormalizedResponse, ProviderAdapter, ProviderConfig, ProviderError, ToolCall, ToolResult};
use crate::tools::ToolSpec;

pub const DEFAULT_MODEL: &str = "gpt-5.2-codex";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug)]
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    tools: Vec<Value>,
    instructions: String,
    input: Vec<Value>,
}

impl OpenAiAdapter {
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
            endpoint: format!("{}/v1/responses", base),
            tools: tools.iter().map(to_function_tool).collect(),
            instructions: String::new(),
            input: Vec::new(),
        }
    }

    fn request_body(&self) -> Value {
        json!({
            "model": self.model,
            "instructions": self.instructions,
            "input": self.input,
            "tools": self.tools,
            "tool_choice": "auto",
        })
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_initial_messages(&mut self, system_prompt: &str, user_prompt: &str) {
        self.instructions = system_prompt.to_string();
        self.input = vec![json!({ "role": "user", "content": user_prompt })];
    }

    async fn call(&mut self) -> Result<NormalizedResponse, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let raw: Value = serde_json::from_str(&body)?;
        let (items, normalized) = parse_response(&raw)?;
        debug!(
            items = items.len(),
            tool_calls = normalized.tool_calls.len(),
            done = normalized.done,
            "OpenAI response"
        );
        self.input.extend(items);
        Ok(normalized)
    }

    fn append_tool_results(&mut self, results: &[ToolResult]) {
        for result in results {
            self.input.push(json!({
                "type": "function_call_output",
                "call_id": result.id,
                "output": result.content,
            }));
        }
    }
}

fn to_function_tool(spec: &ToolSpec) -> Value {
    json!({
        "type": "function",
        "name": spec.name,
        "description": spec.description,
        "parameters": spec.parameters,
        "strict": false,
    })
}

#[derive(Debug, Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<MessagePart>,
    },
    FunctionCall {
        call_id: String,
        name: String,
        #[serde(default)]
        arguments: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MessagePart {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

/// Split a Responses API body into the items to echo back and the normalized turn
pub fn parse_response(raw: &Value) -> Result<(Vec<Value>, NormalizedResponse), ProviderError> {
    let body: ResponsesBody = serde_json::from_value(raw.clone())?;
    let items = body
        .output
        .ok_or_else(|| ProviderError::MalformedResponse("missing output array".to_string()))?;

    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for item in &items {
        let parsed = match serde_json::from_value::<OutputItem>(item.clone()) {
            Ok(parsed) => parsed,
            Err(_) => continue,
        };
        match parsed {
            OutputItem::Message { content } => {
                for part in content {
                    if let MessagePart::OutputText { text: chunk } = part {
                        text.push_str(&chunk);
                    }
                }
            }
            OutputItem::FunctionCall {
                call_id,
                name,
                arguments,
            } => {
                tool_calls.push(ToolCall {
                    id: call_id,
                    name,
                    arguments: parse_arguments(&arguments),
                });
            }
            OutputItem::Other => {}
        }
    }

    let done = body.status.as_deref() == Some("completed") && tool_calls.is_empty();
    let normalized = NormalizedResponse {
        content: (!text.is_empty()).then_some(text),
        tool_calls,
        done,
    };
    Ok((items, normalized))
}

/// Function arguments arrive as a JSON string; keep unparseable input visible to the tool
fn parse_arguments(arguments: &str) -> Value {
    if arguments.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(arguments).unwrap_or_else(|_| json!({ "raw": arguments }))
}

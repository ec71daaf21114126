//! Investigation subject and the prompts sent to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// System prompt for the diagnostic agent
pub const SYSTEM_PROMPT: &str = r#"You are a Docker diagnostic agent running inside a container-fleet dashboard. Your job is to investigate container problems and produce a diagnosis.

## Investigation approach

1. **Start with inspect + logs**: Always begin by calling get_container_inspect and get_container_logs to understand the container's state and recent output.
2. **Check events if the container died**: If the container exited or was killed, call get_container_events to see what happened.
3. **Check health logs if configured**: If the container has health checks, call get_container_health_log.
4. **Exec only if needed**: Only use exec_in_container or exec_on_host when the logs/inspect don't reveal the root cause. Check disk space, DNS, ports, config files, etc.
5. **Be efficient**: You have a limited number of tool calls. Don't repeat calls. Don't call tools whose output won't help your investigation.

## Rules

- You are READ-ONLY. Never suggest running destructive commands.
- Your diagnosis must be based on evidence from the tools, not speculation.
- If you cannot determine the root cause, say so honestly.
- Keep your reasoning concise; it is displayed in a terminal UI.

## Output format

When you have enough information, produce your final diagnosis in EXACTLY this format (no markdown, no extra formatting):

DIAGNOSIS: [one-line summary of the problem]
ROOT CAUSE: [detailed explanation of why the container is in this state]
EVIDENCE: [bulleted list using - prefix]
RECOMMENDED FIX: [actionable steps the user should take]
SEVERITY: [critical|high|medium|low]"#;

/// The container under investigation, as sent by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerSubject {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub status: Option<String>,
    pub health: Option<String>,
    /// CPU percentage; number or preformatted string
    pub cpu: Option<Value>,
    pub mem_mb: Option<Value>,
    pub uptime: Option<String>,
    /// `-` means no published ports
    pub ports: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiblingContainer {
    pub name: String,
    pub status: String,
}

/// Compose stack the container belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackContext {
    pub stack_name: String,
    pub managed: bool,
    pub other_containers: Vec<SiblingContainer>,
}

/// Body of a start-investigation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestigationRequest {
    pub container: ContainerSubject,
    pub stack_context: Option<StackContext>,
}

impl InvestigationRequest {
    pub fn new(container: ContainerSubject) -> Self {
        Self {
            container,
            stack_context: None,
        }
    }

    /// Both id and name must be present and non-blank
    pub fn is_valid(&self) -> bool {
        !self.container.id.trim().is_empty() && !self.container.name.trim().is_empty()
    }
}

/// Build the first user message describing the container
pub fn build_user_prompt(request: &InvestigationRequest) -> String {
    let c = &request.container;
    let mut lines = vec![
        "Investigate this container:".to_string(),
        format!("- Name: {}", c.name),
        format!("- ID: {}", c.id),
        format!("- Image: {}", non_blank(c.image.as_deref()).unwrap_or("unknown")),
        format!("- Status: {}", non_blank(c.status.as_deref()).unwrap_or("unknown")),
        format!("- Health: {}", non_blank(c.health.as_deref()).unwrap_or("unknown")),
    ];

    if let Some(cpu) = c.cpu.as_ref().and_then(display_value) {
        lines.push(format!("- CPU: {}%", cpu));
    }
    if let Some(mem) = c.mem_mb.as_ref().and_then(display_value) {
        lines.push(format!("- Memory: {} MB", mem));
    }
    if let Some(uptime) = non_blank(c.uptime.as_deref()) {
        lines.push(format!("- Uptime: {}", uptime));
    }
    if let Some(ports) = non_blank(c.ports.as_deref()).filter(|p| *p != "-") {
        lines.push(format!("- Ports: {}", ports));
    }

    if let Some(stack) = &request.stack_context {
        lines.push(String::new());
        lines.push("Stack context:".to_string());
        lines.push(format!("- Stack: {}", stack.stack_name));
        lines.push(format!("- Managed: {}", if stack.managed { "yes" } else { "no" }));
        if !stack.other_containers.is_empty() {
            lines.push("- Other containers in stack:".to_string());
            for sibling in &stack.other_containers {
                lines.push(format!("  - {} ({})", sibling.name, sibling.status));
            }
        }
    }

    lines.push(String::new());
    lines.push(
        "Start your investigation. Call get_container_inspect and get_container_logs first."
            .to_string(),
    );

    lines.join("\n")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

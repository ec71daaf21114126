//! Tool names and the JSON schemas advertised to the model

use serde::Serialize;
use serde_json::json;

/// Provider-agnostic tool definition.
///
/// Each provider adapter converts this into its own wire shape
/// (`input_schema` for Anthropic, `parameters` for OpenAI).
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema for the arguments object
    pub parameters: serde_json::Value,
}

/// The fixed set of tools the diagnostic agent may call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ContainerLogs,
    ContainerInspect,
    ContainerTop,
    ContainerDiff,
    ContainerEvents,
    ContainerHealthLog,
    ExecInContainer,
    ExecOnHost,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::ContainerLogs,
        ToolKind::ContainerInspect,
        ToolKind::ContainerTop,
        ToolKind::ContainerDiff,
        ToolKind::ContainerEvents,
        ToolKind::ContainerHealthLog,
        ToolKind::ExecInContainer,
        ToolKind::ExecOnHost,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::ContainerLogs => "get_container_logs",
            ToolKind::ContainerInspect => "get_container_inspect",
            ToolKind::ContainerTop => "get_container_top",
            ToolKind::ContainerDiff => "get_container_diff",
            ToolKind::ContainerEvents => "get_container_events",
            ToolKind::ContainerHealthLog => "get_container_health_log",
            ToolKind::ExecInContainer => "exec_in_container",
            ToolKind::ExecOnHost => "exec_on_host",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether this tool runs an arbitrary command and counts toward the exec budget
    pub fn is_exec(&self) -> bool {
        matches!(self, ToolKind::ExecInContainer | ToolKind::ExecOnHost)
    }

    pub fn spec(&self) -> ToolSpec {
        let (description, parameters) = match self {
            ToolKind::ContainerLogs => (
                "Read recent logs from a container. Returns timestamped log lines.",
                json!({
                    "type": "object",
                    "properties": {
                        "container_id": container_id_param(),
                        "tail": {
                            "type": "number",
                            "description": "Number of recent lines (default 100, max 500)"
                        }
                    },
                    "required": ["container_id"]
                }),
            ),
            ToolKind::ContainerInspect => (
                "Get detailed container info: state, config, mounts, networks, exit code, health, restart policy.",
                container_only_params(),
            ),
            ToolKind::ContainerTop => (
                "List processes running inside a container (only works on running containers).",
                container_only_params(),
            ),
            ToolKind::ContainerDiff => (
                "Show filesystem changes made inside the container since it started.",
                container_only_params(),
            ),
            ToolKind::ContainerEvents => (
                "Get recent Docker engine events for a specific container (last 10 minutes).",
                container_only_params(),
            ),
            ToolKind::ContainerHealthLog => (
                "Get health check results from the container (if health check is configured).",
                container_only_params(),
            ),
            ToolKind::ExecInContainer => (
                "Run a safe read-only command inside the container. Only allow-listed binaries \
                 are accepted (cat, ls, df, ps, grep, ...). No writes, redirects or destructive commands.",
                json!({
                    "type": "object",
                    "properties": {
                        "container_id": container_id_param(),
                        "command": {
                            "type": "string",
                            "description": "Shell command to execute (read-only only)"
                        }
                    },
                    "required": ["container_id", "command"]
                }),
            ),
            ToolKind::ExecOnHost => (
                "Run a safe read-only command on the Docker host. Only allow-listed binaries are \
                 accepted (df, free, ps, ss, ip, cat, ...). Useful for disk space, memory, \
                 processes, ports and DNS configuration.",
                json!({
                    "type": "object",
                    "properties": {
                        "command": {
                            "type": "string",
                            "description": "Shell command to execute on the host (read-only only)"
                        }
                    },
                    "required": ["command"]
                }),
            ),
        };

        ToolSpec {
            name: self.name(),
            description,
            parameters,
        }
    }
}

/// Every tool definition, in catalog order
pub fn tool_specs() -> Vec<ToolSpec> {
    ToolKind::ALL.iter().map(ToolKind::spec).collect()
}

/// True for the two command-execution tools
pub fn is_exec_tool(name: &str) -> bool {
    ToolKind::from_name(name).is_some_and(|kind| kind.is_exec())
}

fn container_id_param() -> serde_json::Value {
    json!({
        "type": "string",
        "description": "Hex container ID (12 chars is typical)"
    })
}

fn container_only_params() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "container_id": container_id_param()
        },
        "required": ["container_id"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("delete_container"), None);
    }

    #[test]
    fn test_exec_classification() {
        assert!(is_exec_tool("exec_in_container"));
        assert!(is_exec_tool("exec_on_host"));
        assert!(!is_exec_tool("get_container_logs"));
        assert!(!is_exec_tool("unknown"));
    }

    #[test]
    fn test_specs_have_object_schemas() {
        let specs = tool_specs();
        assert_eq!(specs.len(), 8);
        for spec in &specs {
            assert_eq!(spec.parameters["type"], "object");
            assert!(spec.parameters["required"].is_array());
        }
        let host = specs.iter().find(|s| s.name == "exec_on_host").unwrap();
        assert_eq!(host.parameters["required"][0], "command");
        assert!(host.parameters["properties"]["container_id"].is_null());
    }
}

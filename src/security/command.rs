//! Command validation for agent-initiated exec tools
//!
//! # Why Validate Commands?
//!
//! The diagnostic agent may ask to run shell commands inside a container or
//! on the host. The model is not trusted: a confused or prompt-injected model
//! could ask for `rm -rf /`. Every command passes through `validate_command`
//! before anything is spawned, and the same rules apply to both targets.
//!
//! # Two Layers
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Layer 1: BLOCKED PATTERNS (whole command string)                 │
//! │    rm, kill, dd, mkfs, package managers, interpreters,            │
//! │    `sh -c`, sudo, redirects (>), `sed -i`, `env <cmd>`,           │
//! │    `find -exec`, `curl -o`, awk `system()`, ...                   │
//! └───────────────────────────────────────────────────────────────────┘
//!                               │ no match
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Layer 2: ALLOWED BINARIES (per segment)                          │
//! │                                                                   │
//! │   "LANG=C /bin/ps aux | grep nginx"                               │
//! │        │                  │                                       │
//! │        ▼                  ▼                                       │
//! │   skip LANG=C        "grep" ✓                                     │
//! │   "/bin/ps" → "ps" ✓                                              │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Layer 2 is an allow-list: a verb nobody thought about is rejected by
//! default. Layer 1 catches danger that hides inside an allowed pipeline,
//! like `cat /etc/passwd > /tmp/x`.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

/// Longest command accepted, in characters
pub const MAX_COMMAND_LEN: usize = 2000;

/// Read-only inspection binaries the agent may invoke
pub const ALLOWED_BINARIES: &[&str] = &[
    "cat", "ls", "df", "ps", "whoami", "env", "printenv", "mount", "ip", "ss", "ping",
    "nslookup", "dig", "head", "tail", "wc", "find", "stat", "file", "uname", "date", "uptime",
    "free", "id", "hostname", "netstat", "grep", "awk", "sort", "uniq", "cut", "echo", "which",
    "curl", "top", "du", "lsof", "getent",
];

const BLOCKED_PATTERNS: &[&str] = &[
    r"\brm\b",
    r"\bkill\b",
    r"\bshutdown\b",
    r"\breboot\b",
    r"\bmkfs\b",
    r"\bdd\b",
    r"\bchmod\b",
    r"\bchown\b",
    r"\bmv\b",
    r"\bcp\b",
    r">+",
    r"\bapt\b",
    r"\byum\b",
    r"\bapk\b",
    r"\bpip\b",
    r"\bnpm\b",
    r"\bwget\b",
    r"\bpython\b",
    r"\bnode\b",
    r"\bruby\b",
    r"\bperl\b",
    r"\bbash\s+-c\b",
    r"\bsh\s+-c\b",
    r"\bsudo\b",
    r"\bsu\b",
    r"\btee\b",
    r"\bsed\b.*-i",
    r"\bmkdir\b",
    r"\btouch\b",
    // `env` launching a program, past any NAME=value arguments
    r"\benv\s+([A-Za-z_][A-Za-z0-9_]*=\S*\s+)*[^\s=|;&]+(\s|$)",
    // find actions that write or spawn
    r"\s-(delete|exec|execdir|ok|okdir)\b",
    // curl writing files or uploading them
    r"\bcurl\b.*\s(-[A-Za-z]*[oOT]|--(output|remote-name|upload-file)\b)",
    // awk and friends shelling out
    r"\bsystem\s*\(",
];

lazy_static! {
    static ref BLOCKED: Vec<Regex> = BLOCKED_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("blocked pattern compiles"))
        .collect();

    static ref ENV_ASSIGNMENT: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*=").expect("static regex");

    static ref ALLOWED: HashSet<&'static str> = ALLOWED_BINARIES.iter().copied().collect();
}

// ═══════════════════════════════════════════════════════════════════════════
// CommandVerdict
// ═══════════════════════════════════════════════════════════════════════════
// Result of validating one command string. `Rejected` carries a reason that
// is shown to the model verbatim, so it must say what was wrong.
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandVerdict {
    Allowed,
    Rejected(String),
}

impl CommandVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, CommandVerdict::Allowed)
    }

    /// Rejection reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            CommandVerdict::Allowed => None,
            CommandVerdict::Rejected(reason) => Some(reason),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// validate_command(command) - the single entry point
// ═══════════════════════════════════════════════════════════════════════════
// STEPS:
//   1. Reject empty and oversized input
//   2. Reject command substitution ($(...) and backticks)
//   3. Reject if any blocked pattern matches anywhere
//   4. Split into segments, check each segment's binary against ALLOWED
//
// PURE:
//   No I/O and no shared state beyond the compiled regexes, so the same
//   input always yields the same verdict.
// ═══════════════════════════════════════════════════════════════════════════
pub fn validate_command(command: &str) -> CommandVerdict {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return CommandVerdict::Rejected("Empty command".to_string());
    }
    if trimmed.chars().count() > MAX_COMMAND_LEN {
        return CommandVerdict::Rejected(format!(
            "Command too long (max {} chars)",
            MAX_COMMAND_LEN
        ));
    }
    if trimmed.contains("$(") || trimmed.contains('`') {
        return CommandVerdict::Rejected("Command substitution not allowed".to_string());
    }

    for pattern in BLOCKED.iter() {
        if pattern.is_match(trimmed) {
            return CommandVerdict::Rejected(format!("Blocked pattern: {}", pattern.as_str()));
        }
    }

    for segment in split_segments(trimmed) {
        match segment_binary(segment) {
            None => {
                return CommandVerdict::Rejected(format!(
                    "Could not determine binary in: {}",
                    segment
                ));
            }
            Some(binary) if !ALLOWED.contains(binary) => {
                return CommandVerdict::Rejected(format!("Binary not allowed: {}", binary));
            }
            Some(_) => {}
        }
    }

    CommandVerdict::Allowed
}

/// Split a command line into the pieces that each start a new program.
///
/// Pipes are the main separator; `;`, `&` and newlines also start a new
/// program under `sh -c`, so they are treated the same way.
pub fn split_segments(command: &str) -> Vec<&str> {
    command
        .split(['|', ';', '&', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Leading binary of one segment, skipping `NAME=value` prefixes and
/// stripping any directory part (`/usr/bin/ps` → `ps`).
pub fn segment_binary(segment: &str) -> Option<&str> {
    let token = segment
        .split_whitespace()
        .find(|token| !ENV_ASSIGNMENT.is_match(token))?;
    let binary = token.rsplit('/').next().unwrap_or(token);
    if binary.is_empty() {
        None
    } else {
        Some(binary)
    }
}

//! Container runtime access
//!
//! Everything the agent learns about containers comes from running the
//! `docker` CLI (or `sh` for host commands) as a subprocess. The tool
//! executors only see the small [`CommandRunner`] interface, so tests can
//! swap in a fake runner and never touch a real daemon.
//!
//! ```text
//! ToolRegistry ──run("docker", ["logs", ...], 10s)──► CommandRunner
//!                                                        │
//!                                          SystemRunner: tokio::process
//!                                          (own process, own pipes,
//!                                           killed on timeout)
//! ```

pub mod runner;

pub use runner::{CommandOutput, CommandRunner, RunnerError, SystemRunner};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONTAINER_ID: Regex = Regex::new(r"^[a-f0-9]{3,64}$").expect("static regex");
}

/// Check that a container identifier is a lowercase hex id (3 to 64 chars).
///
/// Names are not accepted: ids are the only form that can never be parsed
/// as a CLI flag or contain shell metacharacters.
pub fn validate_container_id(id: &str) -> bool {
    CONTAINER_ID.is_match(id)
}

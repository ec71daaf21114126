//! Security module for vaultdock
//!
//! The diagnostic agent is driven by an untrusted model, so anything that
//! can run a command goes through this module first.
//!
//! # Security Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Layer 1: TOOL CATALOG                                          │
//! │  The model can only call the fixed read-only tool set;          │
//! │  container ids must be hex before any subprocess starts.        │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Layer 2: COMMAND VALIDATION (exec tools only)                  │
//! │                                                                 │
//! │  command ──► blocked patterns? ──► allow-listed binaries? ──►   │
//! │                    │                       │             run    │
//! │                    └─────── reject ◄───────┘                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Layer 3: BUDGETS (agent loop)                                  │
//! │  At most 5 exec commands per investigation, 10s each.           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod command;

pub use command::{validate_command, CommandVerdict, ALLOWED_BINARIES, MAX_COMMAND_LEN};

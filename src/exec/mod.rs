// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs a compiled command with `tokio::process::Command` and reports back
//! to the caller.
//!
//! - [`process`] spawns the child, pumps stdout/stderr and decides the
//!   final outcome.
//! - [`events`] holds the streaming events, the aggregated result and the
//!   per-invocation options.

pub mod events;
pub mod process;

pub use events::{ExecEvent, ExecOptions, ExecOutput};
pub use process::{UNBUFFERED_ENV, run_command};

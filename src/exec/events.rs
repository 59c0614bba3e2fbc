// src/exec/events.rs

//! Values exchanged between the process runner and its caller.

use std::path::PathBuf;

/// Notification emitted while a command runs.
///
/// `Stdout` and `Stderr` carry the raw chunks exactly as read from the pipe,
/// in arrival order. `Close` is sent once, after both pipes are closed and
/// the process has exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecEvent {
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
    Close(Option<i32>),
}

impl ExecEvent {
    /// Raw output carried by a `Stdout`/`Stderr` event.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            ExecEvent::Stdout(data) | ExecEvent::Stderr(data) => Some(data.as_slice()),
            ExecEvent::Close(_) => None,
        }
    }
}

/// Result of a command that exited successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code; `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    /// stdout and stderr interleaved in arrival order.
    pub output: String,
}

/// Per-invocation process options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Working directory for the child; inherits ours when `None`.
    pub cwd: Option<PathBuf>,
    /// Directory holding `ansible` / `ansible-playbook` (e.g. a virtualenv's
    /// `bin`); looked up on `PATH` when `None`.
    pub bin_dir: Option<PathBuf>,
}

impl ExecOptions {
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = Some(dir.into());
        self
    }
}

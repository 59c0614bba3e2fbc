// src/logging.rs

//! Logging setup for `ansible-exec` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` (applies to every target)
//! 2. `ANSIBLE_EXEC_LOG`, read as an `EnvFilter` directive list, so both
//!    `debug` and `ansible_exec::exec=trace,warn` work
//! 3. `warn`
//!
//! Logs go to STDERR, interleaved with the child's stderr. The child's
//! stdout is forwarded untouched.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "ANSIBLE_EXEC_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = EnvFilter::try_new(filter_directive(cli_level, env_value.as_deref()))
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Pick the filter directive for a CLI level and an `ANSIBLE_EXEC_LOG` value.
///
/// A blank env value counts as unset.
pub fn filter_directive(cli_level: Option<LogLevel>, env_value: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level.as_directive().to_string();
    }
    env_value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

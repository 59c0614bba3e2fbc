// src/command/mod.rs

//! Command builders for `ansible` and `ansible-playbook`.
//!
//! - [`AnsibleCommand`] is the contract every command variant satisfies:
//!   which executable to run, how to compile its argument vector and how to
//!   validate its configuration before anything is spawned.
//! - [`CommonConfig`] holds the flags shared by both executables and knows
//!   how to append them to an argument vector.
//! - [`CommonOptions`] gives every command the fluent setters for those
//!   shared flags.
//! - [`adhoc`] and [`playbook`] are the two concrete variants.

pub mod adhoc;
pub mod playbook;

use std::fmt::Display;

use serde::Deserialize;
use tokio::sync::mpsc;

use crate::errors::Result;
use crate::exec::{ExecEvent, ExecOptions, ExecOutput, run_command};

pub use adhoc::{AdHoc, AdHocConfig};
pub use playbook::{Playbook, PlaybookConfig};

/// Flags shared by `ansible` and `ansible-playbook`.
///
/// Every field is optional; an unset (or empty) field means the flag is not
/// emitted at all. This is also the shape of the `[defaults]` section of the
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// `-f`: how many hosts Ansible talks to in parallel.
    pub forks: Option<u32>,
    /// Verbosity as a pre-formatted level such as `"vvv"`, emitted as `-vvv`.
    pub verbose: Option<String>,
    /// `-u`: remote user.
    pub user: Option<String>,
    /// `-i`: inventory path or host list.
    pub inventory: Option<String>,
    /// `--private-key`: emitted wrapped in double quotes.
    pub private_key: Option<String>,
    /// `-l`: host-limit pattern.
    pub limit: Option<String>,
    /// `-U`: privilege-escalation user.
    pub su: Option<String>,
    /// `-s`: escalate privileges.
    pub sudo: bool,
}

impl CommonConfig {
    /// Append `-<verbose>` if a verbosity level is set.
    pub fn add_verbose(&self, params: &mut Vec<String>) {
        if let Some(level) = self.verbose.as_deref().filter(|s| !s.is_empty()) {
            params.push(format!("-{level}"));
        }
    }

    /// Append `-s` if privilege escalation is requested.
    pub fn add_sudo(&self, params: &mut Vec<String>) {
        if self.sudo {
            params.push("-s".to_string());
        }
    }

    /// Append every shared flag in a fixed order:
    /// forks, user, inventory, limit, su, private key, verbosity, sudo.
    ///
    /// The order does not matter to Ansible but keeps the emitted command
    /// line reproducible.
    pub fn compile_into(&self, params: &mut Vec<String>) {
        add_param(params, self.forks.as_ref(), "f");
        add_param(params, self.user.as_deref(), "u");
        add_param(params, self.inventory.as_deref(), "i");
        add_param(params, self.limit.as_deref(), "l");
        add_param(params, self.su.as_deref(), "U");
        add_path_param(params, self.private_key.as_deref(), "-private-key");
        self.add_verbose(params);
        self.add_sudo(params);
    }

    /// Fill every unset field from `defaults`. Fields already set win.
    pub fn merge_defaults(&mut self, defaults: &CommonConfig) {
        fn fill<T: Clone>(slot: &mut Option<T>, default: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(default);
            }
        }

        fill(&mut self.forks, &defaults.forks);
        fill(&mut self.verbose, &defaults.verbose);
        fill(&mut self.user, &defaults.user);
        fill(&mut self.inventory, &defaults.inventory);
        fill(&mut self.private_key, &defaults.private_key);
        fill(&mut self.limit, &defaults.limit);
        fill(&mut self.su, &defaults.su);
        self.sudo |= defaults.sudo;
    }
}

/// Append `-<flag> <value>` if `value` is set and renders non-empty.
pub fn add_param<T>(params: &mut Vec<String>, value: Option<&T>, flag: &str)
where
    T: Display + ?Sized,
{
    if let Some(value) = value {
        let value = value.to_string();
        if !value.is_empty() {
            add_param_value(params, value, flag);
        }
    }
}

/// Unconditionally append `-<flag> <value>`.
pub fn add_param_value(params: &mut Vec<String>, value: impl Display, flag: &str) {
    params.push(format!("-{flag}"));
    params.push(value.to_string());
}

/// Like [`add_param`], but wraps the value in double quotes.
///
/// Used for filesystem paths that may contain spaces.
pub fn add_path_param(params: &mut Vec<String>, value: Option<&str>, flag: &str) {
    if let Some(path) = value.filter(|s| !s.is_empty()) {
        add_param_value(params, format!("\"{path}\""), flag);
    }
}

/// Contract implemented by every command variant.
#[allow(async_fn_in_trait)]
pub trait AnsibleCommand {
    /// Name of the executable to launch.
    fn command_name(&self) -> &'static str;

    /// Full argument vector, without the executable itself.
    fn compile_params(&self) -> Vec<String>;

    /// Check that every required field is present.
    fn validate(&self) -> Result<()>;

    fn common(&self) -> &CommonConfig;

    fn common_mut(&mut self) -> &mut CommonConfig;

    /// Human-readable command line, used for dry runs and logging.
    fn command_line(&self) -> String {
        let mut line = self.command_name().to_string();
        for param in self.compile_params() {
            line.push(' ');
            line.push_str(&param);
        }
        line
    }

    /// Validate, spawn the executable and wait for it to finish.
    ///
    /// Resolves with the exit code and the combined stdout/stderr transcript
    /// when the process exits with 0; any other exit fails with
    /// [`AnsibleError::Execution`](crate::errors::AnsibleError::Execution).
    async fn exec(&self, options: ExecOptions) -> Result<ExecOutput> {
        run_command(self, &options, None).await
    }

    /// Same as [`exec`](AnsibleCommand::exec), additionally forwarding every
    /// output chunk and the final exit code to `events` as they happen.
    async fn exec_with_events(
        &self,
        options: ExecOptions,
        events: mpsc::UnboundedSender<ExecEvent>,
    ) -> Result<ExecOutput> {
        run_command(self, &options, Some(events)).await
    }
}

/// Fluent setters for the flags in [`CommonConfig`].
///
/// Implemented for every [`AnsibleCommand`]; each setter consumes the builder
/// and hands it back so calls can be chained.
pub trait CommonOptions: AnsibleCommand + Sized {
    fn forks(mut self, forks: u32) -> Self {
        self.common_mut().forks = Some(forks);
        self
    }

    fn verbose(mut self, level: impl Into<String>) -> Self {
        self.common_mut().verbose = Some(level.into());
        self
    }

    fn user(mut self, user: impl Into<String>) -> Self {
        self.common_mut().user = Some(user.into());
        self
    }

    fn inventory(mut self, inventory: impl Into<String>) -> Self {
        self.common_mut().inventory = Some(inventory.into());
        self
    }

    fn private_key(mut self, path: impl Into<String>) -> Self {
        self.common_mut().private_key = Some(path.into());
        self
    }

    fn limit(mut self, pattern: impl Into<String>) -> Self {
        self.common_mut().limit = Some(pattern.into());
        self
    }

    fn su(mut self, user: impl Into<String>) -> Self {
        self.common_mut().su = Some(user.into());
        self
    }

    fn as_sudo(mut self) -> Self {
        self.common_mut().sudo = true;
        self
    }

    /// Apply defaults (e.g. from the config file) without overriding
    /// anything already set on this builder.
    fn with_defaults(mut self, defaults: &CommonConfig) -> Self {
        self.common_mut().merge_defaults(defaults);
        self
    }
}

impl<T: AnsibleCommand> CommonOptions for T {}

// src/command/adhoc.rs

//! `ansible <hosts> -m <module> [-a <args>]`: run a single module against a
//! host pattern.

use crate::args::format_args;
use crate::command::{AnsibleCommand, CommonConfig};
use crate::errors::{AnsibleError, Result};
use crate::types::{ArgsInput, ModuleArgs};

/// Configuration of an ad-hoc invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdHocConfig {
    pub common: CommonConfig,
    pub module: Option<String>,
    pub args: Option<ModuleArgs>,
    pub freeform: Option<String>,
    pub hosts: Option<String>,
}

/// Builder for an `ansible` ad-hoc command.
///
/// ```
/// use ansible_exec::{AdHoc, AnsibleCommand, CommonOptions};
///
/// let cmd = AdHoc::new().hosts("web").module("ping").forks(5);
/// assert_eq!(cmd.compile_params(), ["web", "-m", "ping", "-f", "5"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdHoc {
    pub config: AdHocConfig,
}

impl AdHoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.config.module = Some(module.into());
        self
    }

    pub fn hosts(mut self, hosts: impl Into<String>) -> Self {
        self.config.hosts = Some(hosts.into());
        self
    }

    /// Set the module arguments.
    ///
    /// A freeform string replaces only the freeform part; structured
    /// arguments replace both the pairs and the freeform part.
    pub fn args(mut self, args: impl Into<ArgsInput>) -> Self {
        match args.into() {
            ArgsInput::Freeform(freeform) => {
                self.config.freeform = Some(freeform);
            }
            ArgsInput::Structured(args, freeform) => {
                self.config.args = Some(args);
                self.config.freeform = freeform;
            }
        }
        self
    }
}

impl AnsibleCommand for AdHoc {
    fn command_name(&self) -> &'static str {
        "ansible"
    }

    fn compile_params(&self) -> Vec<String> {
        let config = &self.config;
        let mut params = vec![
            config.hosts.clone().unwrap_or_default(),
            "-m".to_string(),
            config.module.clone().unwrap_or_default(),
        ];

        if let Some(args) = format_args(config.args.as_ref(), config.freeform.as_deref()) {
            params.push("-a".to_string());
            params.push(args);
        }

        config.common.compile_into(&mut params);
        params
    }

    fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.config.hosts.is_none() {
            errors.push("\"hosts\" must be specified");
        }
        if self.config.module.is_none() {
            errors.push("\"module\" must be specified");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AnsibleError::Validation(format!(
                "AdHoc validation failed due to: {}",
                errors.join(",")
            )))
        }
    }

    fn common(&self) -> &CommonConfig {
        &self.config.common
    }

    fn common_mut(&mut self) -> &mut CommonConfig {
        &mut self.config.common
    }
}

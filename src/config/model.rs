// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::command::CommonConfig;
use crate::exec::ExecOptions;

/// Configuration file as read from TOML, before validation.
///
/// ```toml
/// [defaults]
/// inventory = "hosts.ini"
/// user = "deploy"
/// forks = 10
/// verbose = "vv"
///
/// [exec]
/// cwd = "infra"
/// bin_dir = ".venv/bin"
/// ```
///
/// Both sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Shared flags applied to every command unless set on the command line.
    #[serde(default)]
    pub defaults: CommonConfig,

    /// Process options.
    #[serde(default)]
    pub exec: ExecSection,
}

/// `[exec]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecSection {
    /// Working directory for the spawned process.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Directory containing the ansible executables.
    #[serde(default)]
    pub bin_dir: Option<PathBuf>,
}

/// Validated configuration.
///
/// Fields are private so a `ConfigFile` can only come from
/// `TryFrom<RawConfigFile>` (or `Default`, which is trivially valid).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    defaults: CommonConfig,
    exec: ExecSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(defaults: CommonConfig, exec: ExecSection) -> Self {
        Self { defaults, exec }
    }

    /// Shared flags from `[defaults]`.
    pub fn defaults(&self) -> &CommonConfig {
        &self.defaults
    }

    pub fn exec(&self) -> &ExecSection {
        &self.exec
    }

    /// Process options derived from `[exec]`.
    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            cwd: self.exec.cwd.clone(),
            bin_dir: self.exec.bin_dir.clone(),
        }
    }
}

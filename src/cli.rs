// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::command::CommonConfig;

/// Command-line arguments for `ansible-exec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ansible-exec",
    version,
    about = "Build and run ansible / ansible-playbook commands, streaming their output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a TOML config file with `[defaults]` and `[exec]` sections.
    ///
    /// Default: `AnsibleExec.toml` in the current working directory, if it
    /// exists.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ANSIBLE_EXEC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Print the compiled command line instead of running it.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: CommandArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CommandArgs {
    /// Run a single module against a host pattern (`ansible`).
    Adhoc(AdHocArgs),
    /// Run a playbook (`ansible-playbook`).
    Playbook(PlaybookArgs),
}

/// Flags shared by both subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Number of parallel processes.
    #[arg(short = 'f', long)]
    pub forks: Option<u32>,

    /// Verbosity level, e.g. `vvv`.
    #[arg(long, value_name = "LEVEL")]
    pub verbose: Option<String>,

    /// Remote user.
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Inventory path or comma-separated host list.
    #[arg(short = 'i', long)]
    pub inventory: Option<String>,

    /// Private key file.
    #[arg(long, value_name = "PATH")]
    pub private_key: Option<String>,

    /// Further limit the selected hosts.
    #[arg(short = 'l', long, value_name = "PATTERN")]
    pub limit: Option<String>,

    /// Privilege-escalation user.
    #[arg(short = 'U', long, value_name = "USER")]
    pub su: Option<String>,

    /// Escalate privileges.
    #[arg(short = 's', long)]
    pub sudo: bool,

    /// Working directory for the ansible process.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Directory containing `ansible` / `ansible-playbook`.
    #[arg(long, value_name = "DIR")]
    pub bin_dir: Option<PathBuf>,
}

impl CommonArgs {
    pub fn to_common_config(&self) -> CommonConfig {
        CommonConfig {
            forks: self.forks,
            verbose: self.verbose.clone(),
            user: self.user.clone(),
            inventory: self.inventory.clone(),
            private_key: self.private_key.clone(),
            limit: self.limit.clone(),
            su: self.su.clone(),
            sudo: self.sudo,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AdHocArgs {
    /// Host pattern to target.
    pub hosts: String,

    /// Module to run.
    #[arg(short = 'm', long)]
    pub module: String,

    /// Freeform module arguments, passed through verbatim.
    #[arg(short = 'a', long, value_name = "ARGS")]
    pub args: Option<String>,

    /// Structured module argument; may be repeated.
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub arg: Vec<(String, String)>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PlaybookArgs {
    /// Playbook name; a trailing `.yml` or `.yaml` is stripped.
    pub playbook: String,

    /// Extra variables as a JSON document.
    #[arg(short = 'e', long, value_name = "JSON")]
    pub extra_vars: Option<String>,

    /// Only run tasks with these tags.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Skip tasks with these tags.
    #[arg(long, value_delimiter = ',')]
    pub skip_tags: Vec<String>,

    /// Prompt for the connection password.
    #[arg(long)]
    pub ask_pass: bool,

    /// Prompt for the privilege-escalation password.
    #[arg(long)]
    pub ask_sudo_pass: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

// src/lib.rs

//! Build `ansible` / `ansible-playbook` command lines from typed builders,
//! run them and stream their output.
//!
//! ```no_run
//! use ansible_exec::{AdHoc, AnsibleCommand, CommonOptions, ExecOptions};
//!
//! # async fn demo() -> ansible_exec::errors::Result<()> {
//! let result = AdHoc::new()
//!     .hosts("web")
//!     .module("ping")
//!     .inventory("hosts.ini")
//!     .exec(ExecOptions::default())
//!     .await?;
//! println!("{}", result.output);
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::io;

use anyhow::Result;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::{AdHocArgs, CliArgs, CommandArgs, CommonArgs, PlaybookArgs};
use crate::config::ConfigFile;
use crate::errors::AnsibleError;
use crate::types::ModuleArgs;

pub use crate::args::format_args;
pub use crate::command::{AdHoc, AnsibleCommand, CommonConfig, CommonOptions, Playbook};
pub use crate::exec::{ExecEvent, ExecOptions, ExecOutput};
pub use crate::types::ArgsInput;

/// High-level entry point used by `main.rs`.
///
/// Loads the optional config file, builds the requested command, and either
/// prints it (`--dry-run`) or runs it while forwarding its output to our own
/// stdout/stderr. Returns the exit code the binary should terminate with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();
    run_with_output(args, &mut stdout, &mut stderr).await
}

/// Same as [`run`], writing the child's stdout/stderr (and the dry-run
/// plan) to the given writers.
pub async fn run_with_output<O, E>(args: CliArgs, out: &mut O, err: &mut E) -> Result<i32>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let cfg = config::load_optional(args.config.as_deref())?;

    match &args.command {
        CommandArgs::Adhoc(adhoc) => {
            let command = build_adhoc(adhoc, &cfg);
            let options = exec_options(&adhoc.common, &cfg);
            execute(command, options, args.dry_run, out, err).await
        }
        CommandArgs::Playbook(playbook) => {
            let command = build_playbook(playbook, &cfg)?;
            let options = exec_options(&playbook.common, &cfg);
            execute(command, options, args.dry_run, out, err).await
        }
    }
}

/// Build an [`AdHoc`] from CLI arguments, filling gaps from `[defaults]`.
pub fn build_adhoc(args: &AdHocArgs, cfg: &ConfigFile) -> AdHoc {
    let mut command = AdHoc::new().hosts(&args.hosts).module(&args.module);

    if !args.arg.is_empty() {
        let structured: ModuleArgs = args.arg.iter().cloned().collect();
        command = command.args(ArgsInput::Structured(structured, args.args.clone()));
    } else if let Some(freeform) = &args.args {
        command = command.args(freeform.as_str());
    }

    command.config.common = args.common.to_common_config();
    command.with_defaults(cfg.defaults())
}

/// Build a [`Playbook`] from CLI arguments, filling gaps from `[defaults]`.
///
/// Fails if `--extra-vars` is not valid JSON.
pub fn build_playbook(args: &PlaybookArgs, cfg: &ConfigFile) -> errors::Result<Playbook> {
    let mut command = Playbook::new().playbook(playbook_stem(&args.playbook));

    if let Some(raw) = &args.extra_vars {
        let variables: serde_json::Value = serde_json::from_str(raw)?;
        command = command.variables(variables);
    }
    if !args.tags.is_empty() {
        command = command.tags(args.tags.iter().cloned());
    }
    if !args.skip_tags.is_empty() {
        command = command.skip_tags(args.skip_tags.iter().cloned());
    }
    if args.ask_pass {
        command = command.ask_pass();
    }
    if args.ask_sudo_pass {
        command = command.ask_sudo_pass();
    }

    command.config.common = args.common.to_common_config();
    Ok(command.with_defaults(cfg.defaults()))
}

/// Playbook name without a trailing `.yml` / `.yaml`.
pub fn playbook_stem(name: &str) -> &str {
    name.strip_suffix(".yml")
        .or_else(|| name.strip_suffix(".yaml"))
        .unwrap_or(name)
}

/// `--cwd` / `--bin-dir` win over the `[exec]` section.
pub fn exec_options(common: &CommonArgs, cfg: &ConfigFile) -> ExecOptions {
    let mut options = cfg.exec_options();
    if let Some(cwd) = &common.cwd {
        options.cwd = Some(cwd.clone());
    }
    if let Some(dir) = &common.bin_dir {
        options.bin_dir = Some(dir.clone());
    }
    options
}

async fn execute<C, O, E>(
    command: C,
    options: ExecOptions,
    dry_run: bool,
    out: &mut O,
    err: &mut E,
) -> Result<i32>
where
    C: AnsibleCommand,
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    if dry_run {
        command.validate()?;
        let mut plan = format!("{}\n", command.command_line());
        if let Some(cwd) = &options.cwd {
            plan.push_str(&format!("  cwd: {}\n", cwd.display()));
        }
        if let Some(dir) = &options.bin_dir {
            plan.push_str(&format!("  bin_dir: {}\n", dir.display()));
        }
        out.write_all(plan.as_bytes()).await?;
        out.flush().await?;
        debug!("dry-run complete (no execution)");
        return Ok(0);
    }

    let (tx, rx) = mpsc::unbounded_channel::<ExecEvent>();

    // The sender moves into exec and is dropped when it returns, which ends
    // the forwarding loop.
    let (result, forwarded) = tokio::join!(
        command.exec_with_events(options, tx),
        forward_output(rx, out, err)
    );

    // Losing our own stdout (e.g. `| head`) must not hide the child's result.
    if let Err(e) = forwarded {
        if e.kind() == io::ErrorKind::BrokenPipe {
            debug!("output pipe closed early; discarding remaining output");
        } else {
            warn!(error = %e, "failed to forward ansible output");
        }
    }

    match result {
        Ok(output) => Ok(output.code.unwrap_or(0)),
        Err(AnsibleError::Execution { code, .. }) => {
            info!(exit_code = ?code, "ansible command failed");
            Ok(code.unwrap_or(1))
        }
        Err(e) => Err(e.into()),
    }
}

/// Copy streamed chunks to `out` / `err` as they arrive.
async fn forward_output<O, E>(
    mut rx: mpsc::UnboundedReceiver<ExecEvent>,
    out: &mut O,
    err: &mut E,
) -> io::Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    while let Some(event) = rx.recv().await {
        match event {
            ExecEvent::Stdout(data) => {
                out.write_all(&data).await?;
                out.flush().await?;
            }
            ExecEvent::Stderr(data) => {
                err.write_all(&data).await?;
                err.flush().await?;
            }
            ExecEvent::Close(code) => {
                debug!(exit_code = ?code, "output streams closed");
            }
        }
    }

    Ok(())
}

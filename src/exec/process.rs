// src/exec/process.rs

//! Spawn one Ansible process and stream its output.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::command::AnsibleCommand;
use crate::errors::{AnsibleError, Result};
use crate::exec::events::{ExecEvent, ExecOptions, ExecOutput};

/// Forces Python (and therefore Ansible) to flush output as it is written,
/// so chunks arrive while the run is in progress instead of at the end.
pub const UNBUFFERED_ENV: (&str, &str) = ("PYTHONUNBUFFERED", "1");

const READ_BUF_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn event(self, data: Vec<u8>) -> ExecEvent {
        match self {
            Stream::Stdout => ExecEvent::Stdout(data),
            Stream::Stderr => ExecEvent::Stderr(data),
        }
    }
}

/// Validate `command`, run it and collect its output.
///
/// - Validation errors are returned before anything is spawned.
/// - The executable is looked up on `PATH`, or in `bin_dir` when set.
/// - The child inherits our environment plus `PYTHONUNBUFFERED=1`.
/// - Every chunk read from stdout/stderr is appended to one transcript in
///   arrival order and, if `events` is given, forwarded as it arrives.
/// - Once both pipes are closed the exit status is read exactly once:
///   `Some(0)` resolves with the transcript, anything else (non-zero code or
///   killed by a signal) fails with [`AnsibleError::Execution`].
pub async fn run_command<C>(
    command: &C,
    options: &ExecOptions,
    events: Option<mpsc::UnboundedSender<ExecEvent>>,
) -> Result<ExecOutput>
where
    C: AnsibleCommand + ?Sized,
{
    command.validate()?;

    let program = command.command_name();
    let params = command.compile_params();

    info!(
        program,
        args = ?params,
        cwd = ?options.cwd,
        bin_dir = ?options.bin_dir,
        "starting ansible process"
    );

    let executable = match &options.bin_dir {
        Some(dir) => dir.join(program),
        None => PathBuf::from(program),
    };

    let mut cmd = Command::new(&executable);
    cmd.args(&params)
        .env(UNBUFFERED_ENV.0, UNBUFFERED_ENV.1)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    let mut child = cmd.spawn().map_err(|source| AnsibleError::Spawn {
        program: executable.display().to_string(),
        source,
    })?;

    // Both readers feed one channel so the transcript keeps arrival order.
    let (chunk_tx, mut chunk_rx) = mpsc::unbounded_channel::<(Stream, Vec<u8>)>();
    let mut readers = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_reader(stdout, Stream::Stdout, chunk_tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_reader(stderr, Stream::Stderr, chunk_tx.clone()));
    }
    drop(chunk_tx);

    let mut transcript: Vec<u8> = Vec::new();
    while let Some((stream, data)) = chunk_rx.recv().await {
        debug!(program, ?stream, bytes = data.len(), "output chunk");
        transcript.extend_from_slice(&data);
        if let Some(tx) = &events {
            // A dropped receiver only means nobody is listening anymore.
            let _ = tx.send(stream.event(data));
        }
    }

    for reader in readers {
        if let Err(e) = reader.await {
            warn!(program, error = %e, "output reader task failed");
        }
    }

    let status = child.wait().await;
    finish(program, status, &transcript, events.as_ref())
}

/// Turn the exit status into the final result, emitting `Close` exactly
/// once whether or not the status could be read.
fn finish(
    program: &str,
    status: std::io::Result<ExitStatus>,
    transcript: &[u8],
    events: Option<&mpsc::UnboundedSender<ExecEvent>>,
) -> Result<ExecOutput> {
    let status = match status {
        Ok(status) => status,
        Err(e) => {
            warn!(program, error = %e, "failed to wait for ansible process");
            if let Some(tx) = events {
                let _ = tx.send(ExecEvent::Close(None));
            }
            return Err(e.into());
        }
    };

    let code = status.code();
    // Decoded once so multi-byte characters split across chunks survive.
    let output = String::from_utf8_lossy(transcript).into_owned();

    info!(
        program,
        exit_code = ?code,
        success = status.success(),
        "ansible process exited"
    );

    if let Some(tx) = events {
        let _ = tx.send(ExecEvent::Close(code));
    }

    if code == Some(0) {
        Ok(ExecOutput { code, output })
    } else {
        Err(AnsibleError::Execution { code, output })
    }
}

fn spawn_reader<R>(
    mut reader: R,
    stream: Stream,
    tx: mpsc::UnboundedSender<(Stream, Vec<u8>)>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_BUF_SIZE];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send((stream, buf[..n].to_vec())).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(?stream, error = %e, "failed to read child output");
                    break;
                }
            }
        }
        debug!(?stream, "output stream closed");
    })
}

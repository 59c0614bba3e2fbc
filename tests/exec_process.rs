// tests/exec_process.rs

mod common;
use crate::common::{collect_events, concat_chunks, init_tracing, with_timeout, ScriptCommand};

use ansible_exec::errors::AnsibleError;
use ansible_exec::{AdHoc, AnsibleCommand, ExecEvent, ExecOptions, Playbook};
use tokio::sync::mpsc;

#[tokio::test]
async fn successful_run_returns_code_and_transcript() {
    init_tracing();

    let cmd = ScriptCommand::new("printf 'hello\\n'");
    let out = with_timeout(cmd.exec(ExecOptions::default()))
        .await
        .expect("script should succeed");

    assert_eq!(out.code, Some(0));
    assert_eq!(out.output, "hello\n");
}

#[tokio::test]
async fn transcript_equals_concatenated_chunks() {
    init_tracing();

    let cmd = ScriptCommand::new(
        "printf 'out1\\n'; sleep 0.1; printf 'err1\\n' >&2; sleep 0.1; printf 'out2\\n'",
    );
    let (tx, rx) = mpsc::unbounded_channel();

    let out = with_timeout(cmd.exec_with_events(ExecOptions::default(), tx))
        .await
        .expect("script should succeed");
    let events = collect_events(rx).await;

    assert_eq!(out.output, concat_chunks(&events));
    assert_eq!(out.output, "out1\nerr1\nout2\n");

    assert!(events.iter().any(|e| matches!(e, ExecEvent::Stdout(_))));
    assert!(events.iter().any(|e| matches!(e, ExecEvent::Stderr(d) if d == b"err1\n")));
    assert_eq!(events.last(), Some(&ExecEvent::Close(Some(0))));
    assert_eq!(
        events.iter().filter(|e| matches!(e, ExecEvent::Close(_))).count(),
        1
    );
}

#[tokio::test]
async fn non_zero_exit_fails_with_transcript() {
    init_tracing();

    let cmd = ScriptCommand::new("printf 'partial'; printf ' boom' >&2; exit 3");
    let (tx, rx) = mpsc::unbounded_channel();

    let result = with_timeout(cmd.exec_with_events(ExecOptions::default(), tx)).await;
    let events = collect_events(rx).await;

    match result {
        Err(err @ AnsibleError::Execution { .. }) => {
            assert_eq!(err.exit_code(), Some(3));
            assert_eq!(err.to_string(), "partial boom");
            assert_eq!(err.to_string(), concat_chunks(&events));
        }
        other => panic!("expected Execution error, got {other:?}"),
    }

    assert_eq!(events.last(), Some(&ExecEvent::Close(Some(3))));
}

#[tokio::test]
async fn child_sees_unbuffered_python_env() {
    let cmd = ScriptCommand::new("printf '%s' \"$PYTHONUNBUFFERED\"");
    let out = with_timeout(cmd.exec(ExecOptions::default()))
        .await
        .expect("script should succeed");

    assert_eq!(out.output, "1");
}

#[tokio::test]
async fn child_inherits_parent_environment() {
    // PATH is always set in the test environment.
    let cmd = ScriptCommand::new("test -n \"$PATH\"");
    let out = with_timeout(cmd.exec(ExecOptions::default())).await;
    assert!(out.is_ok(), "PATH should be inherited: {out:?}");
}

#[tokio::test]
async fn cwd_override_is_applied() {
    let dir = tempfile::tempdir().unwrap();

    let cmd = ScriptCommand::new("pwd");
    let out = with_timeout(cmd.exec(ExecOptions::default().cwd(dir.path())))
        .await
        .expect("pwd should succeed");

    let reported = std::fs::canonicalize(out.output.trim()).unwrap();
    let expected = std::fs::canonicalize(dir.path()).unwrap();
    assert_eq!(reported, expected);
}

#[tokio::test]
async fn invalid_command_is_never_spawned() {
    let (tx, rx) = mpsc::unbounded_channel();

    let result = ScriptCommand::unconfigured()
        .exec_with_events(ExecOptions::default(), tx)
        .await;

    assert!(matches!(result, Err(AnsibleError::Validation(_))));
    assert!(collect_events(rx).await.is_empty());
}

#[tokio::test]
async fn builders_fail_validation_before_spawning_ansible() {
    let result = AdHoc::new().hosts("web").exec(ExecOptions::default()).await;
    match result {
        Err(AnsibleError::Validation(msg)) => assert!(msg.contains("\"module\"")),
        other => panic!("expected Validation error, got {other:?}"),
    }

    let result = Playbook::new().exec(ExecOptions::default()).await;
    assert!(matches!(result, Err(AnsibleError::Validation(_))));
}

#[tokio::test]
async fn missing_executable_is_a_spawn_error() {
    let cmd = ScriptCommand::new("true").program("ansible-exec-no-such-binary");

    match cmd.exec(ExecOptions::default()).await {
        Err(AnsibleError::Spawn { program, source }) => {
            assert_eq!(program, "ansible-exec-no-such-binary");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

#[tokio::test]
async fn multibyte_output_survives_chunking() {
    let cmd = ScriptCommand::new("printf 'h\\303'; sleep 0.05; printf '\\251llo'");
    let out = with_timeout(cmd.exec(ExecOptions::default()))
        .await
        .expect("script should succeed");

    assert_eq!(out.output, "héllo");
}

#[tokio::test]
async fn repeated_exec_spawns_independent_processes() {
    let cmd = ScriptCommand::new("printf x");

    let first = with_timeout(cmd.exec(ExecOptions::default())).await.unwrap();
    let second = with_timeout(cmd.exec(ExecOptions::default())).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.output, "x");
}

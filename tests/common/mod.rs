#![allow(dead_code)]

pub use ansible_exec_test_utils::{init_tracing, with_timeout, FakeAnsible, ScriptCommand};

use ansible_exec::ExecEvent;
use tokio::sync::mpsc;

/// Drain every event still buffered in `rx`.
///
/// Only call this after `exec_with_events` returned; the sender is dropped
/// by then so the loop terminates.
pub async fn collect_events(mut rx: mpsc::UnboundedReceiver<ExecEvent>) -> Vec<ExecEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

/// Concatenate the data of every stdout/stderr event, in order.
pub fn concat_chunks(events: &[ExecEvent]) -> String {
    let bytes: Vec<u8> = events
        .iter()
        .filter_map(|e| e.data())
        .flatten()
        .copied()
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

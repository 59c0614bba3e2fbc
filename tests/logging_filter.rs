// tests/logging_filter.rs

use ansible_exec::cli::LogLevel;
use ansible_exec::logging::filter_directive;

#[test]
fn cli_level_wins_over_env() {
    assert_eq!(
        filter_directive(Some(LogLevel::Debug), Some("ansible_exec=trace")),
        "debug"
    );
}

#[test]
fn env_value_is_used_as_directive_list() {
    assert_eq!(
        filter_directive(None, Some(" ansible_exec::exec=trace,warn ")),
        "ansible_exec::exec=trace,warn"
    );
}

#[test]
fn blank_or_missing_env_falls_back_to_warn() {
    assert_eq!(filter_directive(None, Some("   ")), "warn");
    assert_eq!(filter_directive(None, None), "warn");
}

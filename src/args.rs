// src/args.rs

//! Rendering of ad-hoc module arguments into the single `-a` value.

use crate::types::ModuleArgs;

/// Format module arguments for `ansible -a`.
///
/// The freeform part comes first, verbatim. Structured pairs follow as
/// `key=value` tokens in map order. Everything is joined with a single space.
/// Returns `None` when there is nothing to emit.
///
/// Nothing is quoted or escaped. Values containing spaces or `=` are passed
/// as-is and Ansible's own splitting applies.
pub fn format_args(args: Option<&ModuleArgs>, freeform: Option<&str>) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(freeform) = freeform.filter(|s| !s.is_empty()) {
        parts.push(freeform.to_string());
    }

    if let Some(args) = args {
        parts.extend(args.iter().map(|(key, value)| format!("{key}={value}")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

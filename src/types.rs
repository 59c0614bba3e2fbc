use indexmap::IndexMap;

/// Structured module arguments, rendered as `key=value` tokens in insertion
/// order. Re-inserting a key updates its value in place.
pub type ModuleArgs = IndexMap<String, String>;

/// The two ways module arguments can be handed to an ad-hoc command.
///
/// - `Freeform`: the whole `-a` string, passed through verbatim
///   (e.g. `"uptime"` for the `shell` module).
/// - `Structured`: `key=value` pairs, optionally preceded by a freeform part
///   (e.g. `"echo hi"` plus `chdir=/tmp`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsInput {
    Freeform(String),
    Structured(ModuleArgs, Option<String>),
}

impl From<&str> for ArgsInput {
    fn from(s: &str) -> Self {
        ArgsInput::Freeform(s.to_string())
    }
}

impl From<String> for ArgsInput {
    fn from(s: String) -> Self {
        ArgsInput::Freeform(s)
    }
}

impl From<ModuleArgs> for ArgsInput {
    fn from(args: ModuleArgs) -> Self {
        ArgsInput::Structured(args, None)
    }
}

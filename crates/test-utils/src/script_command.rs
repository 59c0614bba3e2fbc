use ansible_exec::command::{AnsibleCommand, CommonConfig};
use ansible_exec::errors::{AnsibleError, Result};
use tracing::debug;

/// A command that runs `sh -c <script>` instead of Ansible.
///
/// Lets tests exercise the real process runner (spawning, streaming,
/// exit-code handling) on machines without Ansible installed.
#[derive(Debug, Clone)]
pub struct ScriptCommand {
    program: &'static str,
    script: Option<String>,
    common: CommonConfig,
}

impl ScriptCommand {
    pub fn new(script: &str) -> Self {
        Self {
            program: "sh",
            script: Some(script.to_string()),
            common: CommonConfig::default(),
        }
    }

    /// A command with no script; it always fails validation.
    pub fn unconfigured() -> Self {
        Self {
            program: "sh",
            script: None,
            common: CommonConfig::default(),
        }
    }

    /// Override the executable, e.g. with one that does not exist.
    pub fn program(mut self, program: &'static str) -> Self {
        self.program = program;
        self
    }
}

impl AnsibleCommand for ScriptCommand {
    fn command_name(&self) -> &'static str {
        self.program
    }

    fn compile_params(&self) -> Vec<String> {
        let params = vec![
            "-c".to_string(),
            self.script.clone().unwrap_or_default(),
        ];
        debug!(?params, "compiled script command");
        params
    }

    fn validate(&self) -> Result<()> {
        if self.script.is_none() {
            return Err(AnsibleError::Validation(
                "ScriptCommand validation failed due to: 'script' must be specified".to_string(),
            ));
        }
        Ok(())
    }

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonConfig {
        &mut self.common
    }
}

// src/command/playbook.rs

//! `ansible-playbook <name>.yml`: run a playbook file.

use serde_json::Value;

use crate::command::{AnsibleCommand, CommonConfig};
use crate::errors::{AnsibleError, Result};

/// Configuration of a playbook run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybookConfig {
    pub common: CommonConfig,
    pub ask_pass: bool,
    pub ask_sudo_pass: bool,
    /// Playbook file name without the `.yml` extension.
    pub playbook: Option<String>,
    /// Extra variables, serialized to JSON and passed with `-e`.
    pub variables: Option<Value>,
    pub tags: Option<Vec<String>>,
    pub skip_tags: Option<Vec<String>>,
}

/// Builder for an `ansible-playbook` command.
///
/// ```
/// use ansible_exec::{AnsibleCommand, Playbook};
///
/// let cmd = Playbook::new().playbook("site").tags(["web", "db"]);
/// assert_eq!(cmd.compile_params(), ["site.yml", "--tags=web,db"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Playbook {
    pub config: PlaybookConfig,
}

impl Playbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ask_pass(mut self) -> Self {
        self.config.ask_pass = true;
        self
    }

    pub fn ask_sudo_pass(mut self) -> Self {
        self.config.ask_sudo_pass = true;
        self
    }

    pub fn playbook(mut self, name: impl Into<String>) -> Self {
        self.config.playbook = Some(name.into());
        self
    }

    /// Set the templated variables. Anything convertible into a JSON value
    /// works: a `serde_json::json!` object, a string, a number.
    pub fn variables(mut self, variables: impl Into<Value>) -> Self {
        self.config.variables = Some(variables.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn skip_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.skip_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// `--tags=a,b`
pub fn tags_flag(tags: &[String]) -> String {
    format!("--tags={}", tags.join(","))
}

/// `--skip-tags=a,b`
pub fn skip_tags_flag(tags: &[String]) -> String {
    format!("--skip-tags={}", tags.join(","))
}

impl AnsibleCommand for Playbook {
    fn command_name(&self) -> &'static str {
        "ansible-playbook"
    }

    fn compile_params(&self) -> Vec<String> {
        let config = &self.config;
        let mut params = vec![format!(
            "{}.yml",
            config.playbook.as_deref().unwrap_or_default()
        )];

        if let Some(variables) = &config.variables {
            // `Value`'s Display is its compact JSON serialization.
            params.push("-e".to_string());
            params.push(variables.to_string());
        }

        if config.ask_pass {
            params.push("--ask-pass".to_string());
        }

        if config.ask_sudo_pass {
            params.push("--ask-sudo-pass".to_string());
        }

        if let Some(tags) = config.tags.as_deref().filter(|t| !t.is_empty()) {
            params.push(tags_flag(tags));
        }

        if let Some(tags) = config.skip_tags.as_deref().filter(|t| !t.is_empty()) {
            params.push(skip_tags_flag(tags));
        }

        config.common.compile_into(&mut params);
        params
    }

    fn validate(&self) -> Result<()> {
        if self.config.playbook.is_none() {
            return Err(AnsibleError::Validation(
                "Playbook validation failed due to: 'playbook' must be specified".to_string(),
            ));
        }
        Ok(())
    }

    fn common(&self) -> &CommonConfig {
        &self.config.common
    }

    fn common_mut(&mut self) -> &mut CommonConfig {
        &mut self.config.common
    }
}

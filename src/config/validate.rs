// src/config/validate.rs

use regex::Regex;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AnsibleError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::AnsibleError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.defaults, raw.exec))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_defaults(cfg)?;
    validate_exec(cfg)?;
    Ok(())
}

fn validate_defaults(cfg: &RawConfigFile) -> Result<()> {
    if cfg.defaults.forks == Some(0) {
        return Err(AnsibleError::ConfigError(
            "[defaults].forks must be >= 1 (got 0)".to_string(),
        ));
    }

    if let Some(ref level) = cfg.defaults.verbose {
        let re = Regex::new(r"^v{1,6}$").map_err(anyhow::Error::from)?;
        if !re.is_match(level) {
            return Err(AnsibleError::ConfigError(format!(
                "[defaults].verbose must be between \"v\" and \"vvvvvv\" (got {level:?})"
            )));
        }
    }

    Ok(())
}

fn validate_exec(cfg: &RawConfigFile) -> Result<()> {
    if let Some(ref cwd) = cfg.exec.cwd {
        if cwd.as_os_str().is_empty() {
            return Err(AnsibleError::ConfigError(
                "[exec].cwd must not be empty".to_string(),
            ));
        }
    }
    if let Some(ref dir) = cfg.exec.bin_dir {
        if dir.as_os_str().is_empty() {
            return Err(AnsibleError::ConfigError(
                "[exec].bin_dir must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

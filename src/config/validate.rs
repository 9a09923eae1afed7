// src/config/validate.rs

use crate::argv::is_valid_env_name;
use crate::config::model::{EngineConfig, RawConfigFile};
use crate::errors::{Result, RuncapError};

impl TryFrom<RawConfigFile> for EngineConfig {
    type Error = crate::errors::RuncapError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(EngineConfig::new_unchecked(raw.redaction))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_mask(cfg)?;
    validate_sensitive_env_vars(cfg)?;
    Ok(())
}

fn validate_mask(cfg: &RawConfigFile) -> Result<()> {
    if cfg.redaction.mask.is_empty() {
        return Err(RuncapError::ConfigError(
            "[redaction].mask must not be empty (secrets would be erased instead of masked)"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_sensitive_env_vars(cfg: &RawConfigFile) -> Result<()> {
    for name in cfg.redaction.sensitive_env_vars.iter() {
        if !is_valid_env_name(name) {
            return Err(RuncapError::ConfigError(format!(
                "[redaction].sensitive_env_vars entry '{}' is not a valid environment variable name",
                name
            )));
        }
    }
    Ok(())
}

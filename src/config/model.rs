// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [redaction]
/// mask = "******"
/// sensitive_env_vars = ["PASSWORD", "GITHUB_TOKEN"]
/// redact_captured = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Redaction behaviour from `[redaction]`.
    #[serde(default)]
    pub redaction: RedactionSection,
}

/// `[redaction]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactionSection {
    /// Mask token substituted for every secret occurrence. Fixed-length by
    /// construction: the same token regardless of the secret's length.
    #[serde(default = "default_mask")]
    pub mask: String,

    /// Allow-list of environment variable names whose ambient values are
    /// auto-added to the secret set.
    ///
    /// Even when such a variable is not part of a command's environment
    /// mapping, its value is masked wherever it appears in the command line
    /// or output.
    #[serde(default = "default_sensitive_env_vars")]
    pub sensitive_env_vars: Vec<String>,

    /// Also scrub the raw buffers returned in `CommandResult`.
    ///
    /// Off by default: programmatic consumers receive the true captured
    /// bytes, and only human-facing surfaces are masked.
    #[serde(default)]
    pub redact_captured: bool,
}

fn default_mask() -> String {
    "******".to_string()
}

fn default_sensitive_env_vars() -> Vec<String> {
    [
        "PASSWORD",
        "SUDO_PASSWORD",
        "API_TOKEN",
        "ACCESS_TOKEN",
        "GITHUB_TOKEN",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for RedactionSection {
    fn default() -> Self {
        Self {
            mask: default_mask(),
            sensitive_env_vars: default_sensitive_env_vars(),
            redact_captured: false,
        }
    }
}

/// Validated engine configuration consumed by the executor.
///
/// Obtained via [`TryFrom<RawConfigFile>`] (see `validate.rs`) or
/// [`Default`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub mask: String,
    pub sensitive_env_vars: Vec<String>,
    pub redact_captured: bool,
}

impl EngineConfig {
    /// Construct without validation. Only `validate.rs` and `Default` go
    /// through here.
    pub(crate) fn new_unchecked(redaction: RedactionSection) -> Self {
        Self {
            mask: redaction.mask,
            sensitive_env_vars: redaction.sensitive_env_vars,
            redact_captured: redaction.redact_captured,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new_unchecked(RedactionSection::default())
    }
}

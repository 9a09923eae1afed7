// src/redact.rs

//! Secret masking for human-facing surfaces.
//!
//! The redactor is applied at exactly three observation points: live-echoed
//! chunks, the verbose command line, and the message of a raised
//! `CommandFailed` error. The raw buffers in a `CommandResult` stay untouched
//! unless `redact_captured` is configured.

use std::collections::HashMap;

/// Read-only view of the invoking process's environment.
///
/// Injected into the redactor instead of an implicit global so tests can
/// substitute a fixed provider.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// `EnvSource` backed by the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// `EnvSource` backed by a fixed map.
#[derive(Debug, Default, Clone)]
pub struct FixedEnv {
    vars: HashMap<String, String>,
}

impl FixedEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for FixedEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Masks configured secrets in display text.
///
/// The secret set is the union of the spec's explicit secrets and the values
/// of a configured allow-list of sensitive environment variable names, read
/// from the injected [`EnvSource`]. Read-only for the duration of an
/// invocation.
#[derive(Debug, Clone)]
pub struct Redactor {
    secrets: Vec<String>,
    mask: String,
}

impl Redactor {
    pub fn new(
        explicit: &[String],
        sensitive_vars: &[String],
        env: &dyn EnvSource,
        mask: impl Into<String>,
    ) -> Self {
        // Empty secrets are skipped: replacing "" would corrupt all text.
        let mut secrets: Vec<String> = explicit
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();

        for name in sensitive_vars {
            if let Some(value) = env.var(name) {
                if !value.is_empty() && !secrets.contains(&value) {
                    secrets.push(value);
                }
            }
        }

        Self {
            secrets,
            mask: mask.into(),
        }
    }

    /// Replace every exact, case-sensitive occurrence of each secret with the
    /// fixed mask token.
    pub fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for secret in &self.secrets {
            out = out.replace(secret, &self.mask);
        }
        out
    }
}

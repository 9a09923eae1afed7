// src/argv.rs

//! Final argument-vector construction.
//!
//! Turns a [`CommandSpec`] into the exact argv handed to process creation:
//!
//! - validates every environment variable name against the shell-identifier
//!   grammar,
//! - resolves the target executable against the effective search path,
//! - wraps with `env NAME=value ...` when variables are injected,
//! - wraps with `sudo -E --` when escalation is requested.
//!
//! No shell is ever interposed. Arguments containing whitespace stay discrete
//! argv entries, so an executable path with spaces is invoked directly rather
//! than misread as several shell words.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::command::CommandSpec;
use crate::errors::{Result, RuncapError};

/// Wrapper binary used for environment injection.
const ENV_BIN: &str = "env";

/// Wrapper binary used for privilege escalation. `-E` forwards the caller's
/// environment explicitly.
const SUDO_BIN: &str = "sudo";

/// Shell-identifier grammar: letter or underscore, then letters, digits or
/// underscores.
static ENV_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));

/// The exact ordered argv passed to process creation. Built once per
/// invocation and never mutated after spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgv(Vec<String>);

impl ResolvedArgv {
    /// The executable entry (`argv[0]`).
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    /// Everything after the executable entry.
    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Single-line rendering for verbose output and error messages.
    ///
    /// Display only; this string is never fed back into process creation.
    pub fn display_line(&self) -> String {
        self.0.join(" ")
    }
}

/// Whether `name` is a valid shell-identifier environment variable name.
pub fn is_valid_env_name(name: &str) -> bool {
    ENV_NAME.is_match(name)
}

/// Validate every environment variable name in `spec`.
///
/// Fails on the first invalid name, before any process is spawned.
pub fn validate_env_names(spec: &CommandSpec) -> Result<()> {
    for name in spec.env.keys() {
        if !is_valid_env_name(name) {
            return Err(RuncapError::InvalidEnvName(name.clone()));
        }
    }
    Ok(())
}

/// Resolve `program` to a concrete path.
///
/// Names containing a path separator are used verbatim; existence is not
/// pre-checked, so a bad path surfaces later as an ordinary spawn failure.
/// Bare names are searched across `search_path` when given, falling back to
/// the ambient `PATH`. Unresolvable bare names pass through unchanged for the
/// same reason.
pub fn resolve_program(program: &str, search_path: Option<&str>) -> PathBuf {
    if program.chars().any(std::path::is_separator) {
        return PathBuf::from(program);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let resolved = match search_path {
        Some(paths) => which::which_in(program, Some(paths), &cwd),
        None => which::which(program),
    };

    resolved.unwrap_or_else(|_| PathBuf::from(program))
}

/// Build the final argv for `spec`.
pub fn build(spec: &CommandSpec) -> Result<ResolvedArgv> {
    validate_env_names(spec)?;

    let search_path = spec.search_path();
    let program = resolve_program(&spec.program, search_path);

    // Present variables ride on an `env` prefix so the child sees them
    // without relying on the parent's inherited environment. Absent (unset)
    // variables are omitted from the list entirely.
    let assignments: Vec<String> = spec
        .env
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}={v}")))
        .collect();

    let mut argv: Vec<String> = Vec::new();

    if !assignments.is_empty() {
        argv.push(path_string(resolve_program(ENV_BIN, search_path)));
        argv.extend(assignments);
    }

    argv.push(path_string(program));
    argv.extend(spec.args.iter().cloned());

    if spec.sudo {
        let mut wrapped = vec![
            path_string(resolve_program(SUDO_BIN, search_path)),
            "-E".to_string(),
            "--".to_string(),
        ];
        wrapped.extend(argv);
        argv = wrapped;
    }

    Ok(ResolvedArgv(argv))
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

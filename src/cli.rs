// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! This is a thin front-end over the library: every flag maps directly onto
//! one [`CommandSpec`] field. Deciding *which* commands to run remains the
//! caller's business.

use clap::{Parser, ValueEnum};

use crate::command::CommandSpec;
use crate::errors::{Result, RuncapError};

/// Command-line arguments for `runcap`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runcap",
    version,
    about = "Run a command with captured, optionally redacted output.",
    long_about = None
)]
pub struct CliArgs {
    /// Inject an environment variable for the child (repeatable).
    #[arg(long = "env", value_name = "NAME=VALUE")]
    pub env: Vec<String>,

    /// Force-unset an environment variable for the child (repeatable).
    #[arg(long = "unset", value_name = "NAME")]
    pub unset: Vec<String>,

    /// Re-invoke the command through `sudo -E --`.
    #[arg(long)]
    pub sudo: bool,

    /// Fail with diagnostics unless the command succeeds.
    #[arg(long)]
    pub check: bool,

    /// Echo the child's stdout live.
    #[arg(long)]
    pub print_stdout: bool,

    /// Suppress the live stderr echo (on by default).
    #[arg(long)]
    pub no_print_stderr: bool,

    /// Print the redacted command line before running.
    #[arg(short, long)]
    pub verbose: bool,

    /// Mask this string wherever output is shown (repeatable).
    #[arg(long = "secret", value_name = "STRING")]
    pub secrets: Vec<String>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Runcap.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNCAP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Program to run, followed by its arguments.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "PROGRAM [ARGS]..."
    )]
    pub command: Vec<String>,
}

impl CliArgs {
    /// Translate the parsed flags into a [`CommandSpec`].
    pub fn to_spec(&self) -> Result<CommandSpec> {
        let mut parts = self.command.iter();
        let program = parts
            .next()
            .ok_or_else(|| RuncapError::ConfigError("no program given".to_string()))?;

        let mut spec = CommandSpec::new(program)
            .args(parts.map(String::as_str))
            .sudo(self.sudo)
            .must_succeed(self.check)
            .print_stdout(self.print_stdout)
            .print_stderr(!self.no_print_stderr)
            .verbose(self.verbose);

        for pair in &self.env {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                RuncapError::ConfigError(format!("--env expects NAME=VALUE, got '{pair}'"))
            })?;
            spec = spec.env(name, value);
        }

        for name in &self.unset {
            spec = spec.unset_env(name);
        }

        for secret in &self.secrets {
            spec = spec.secret(secret);
        }

        Ok(spec)
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

// src/exec/runner.rs

//! Execution orchestration: argv construction, spawn, concurrent capture and
//! result/error assembly.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::argv::{self, ResolvedArgv};
use crate::command::{CommandResult, CommandSpec, ProcessStatus};
use crate::config::EngineConfig;
use crate::errors::{Error, Result, RuncapError};
use crate::exec::launcher::{self, SpawnedProcess};
use crate::exec::pump::spawn_pump;
use crate::redact::{EnvSource, Redactor, SystemEnv};
use crate::sink::{OutputSink, StderrSink, StdoutSink};

/// Subprocess execution engine.
///
/// Owns the ambient pieces every invocation shares: the engine configuration,
/// the environment view used to discover sensitive values, and the two echo
/// sinks. All of them are injectable so tests can substitute fixed providers.
///
/// Each invocation spawns exactly one child process and runs it to
/// completion; the engine imposes no timeout and offers no cancellation.
pub struct Executor {
    config: EngineConfig,
    env: Arc<dyn EnvSource>,
    stdout_sink: Arc<dyn OutputSink>,
    stderr_sink: Arc<dyn OutputSink>,
}

impl Executor {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            env: Arc::new(SystemEnv),
            stdout_sink: Arc::new(StdoutSink),
            stderr_sink: Arc::new(StderrSink),
        }
    }

    /// Replace the ambient environment view (tests use a fixed map).
    pub fn with_env_source(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    /// Replace the echo sinks (tests capture echoed bytes).
    pub fn with_sinks(
        mut self,
        stdout_sink: Arc<dyn OutputSink>,
        stderr_sink: Arc<dyn OutputSink>,
    ) -> Self {
        self.stdout_sink = stdout_sink;
        self.stderr_sink = stderr_sink;
        self
    }

    /// Run `spec`, returning a [`CommandResult`] for any exit status.
    ///
    /// Only construction problems (an invalid environment variable name) are
    /// reported as errors here, unless the spec itself sets `must_succeed`.
    pub async fn run(&self, spec: CommandSpec) -> Result<CommandResult> {
        let must_succeed = spec.must_succeed;
        self.execute(spec, must_succeed).await
    }

    /// Run `spec`, treating any failing status as an error.
    ///
    /// Equivalent to [`run`](Self::run) with `must_succeed` forced true.
    pub async fn run_checked(&self, spec: CommandSpec) -> Result<CommandResult> {
        self.execute(spec, true).await
    }

    /// Single execution path behind both public entry points.
    async fn execute(&self, spec: CommandSpec, must_succeed: bool) -> Result<CommandResult> {
        let argv = argv::build(&spec)?;

        let redactor = Arc::new(Redactor::new(
            &spec.secrets,
            &self.config.sensitive_env_vars,
            self.env.as_ref(),
            &self.config.mask,
        ));

        if spec.verbose {
            // The command line is a human-facing surface; it goes through the
            // stdout sink so tests observe exactly what a user would see.
            self.stdout_sink
                .write_chunk(&format!("{}\n", redactor.redact(&argv.display_line())));
        }
        debug!(command = %redactor.redact(&argv.display_line()), "executing");

        let spawned = match launcher::spawn(&argv, &spec) {
            Ok(spawned) => spawned,
            Err(err) => {
                // Missing or non-executable program. Reported as an ordinary
                // failure with the conventional "command not found" status,
                // never as an engine-level error on the non-raising path.
                warn!(program = %argv.program(), error = %err, "failed to spawn child");
                let result = CommandResult {
                    stdout: Vec::new(),
                    stderr: format!("{}: {}\n", spec.program, err).into_bytes(),
                    status: ProcessStatus::NOT_FOUND,
                };
                return self.finish(result, &argv, &redactor, must_succeed);
            }
        };

        let SpawnedProcess {
            mut child,
            stdout,
            stderr,
        } = spawned;

        let stdout_pump = spawn_pump(
            stdout,
            spec.print_stdout.then(|| Arc::clone(&self.stdout_sink)),
            Arc::clone(&redactor),
        );
        let stderr_pump = spawn_pump(
            stderr,
            spec.print_stderr.then(|| Arc::clone(&self.stderr_sink)),
            Arc::clone(&redactor),
        );

        // Both pumps must observe end-of-stream before the status wait, so
        // the result's buffers are complete when status is reported.
        let stdout_buf = stdout_pump.await.map_err(Error::from)?;
        let stderr_buf = stderr_pump.await.map_err(Error::from)?;

        let status: ProcessStatus = child.wait().await?.into();
        info!(
            program = %argv.program(),
            status = %status,
            success = status.success(),
            "child process exited"
        );

        let result = CommandResult {
            stdout: stdout_buf,
            stderr: stderr_buf,
            status,
        };
        self.finish(result, &argv, &redactor, must_succeed)
    }

    /// Apply optional buffer redaction, then the must-succeed policy.
    fn finish(
        &self,
        mut result: CommandResult,
        argv: &ResolvedArgv,
        redactor: &Redactor,
        must_succeed: bool,
    ) -> Result<CommandResult> {
        if self.config.redact_captured {
            result.stdout = redactor
                .redact(&String::from_utf8_lossy(&result.stdout))
                .into_bytes();
            result.stderr = redactor
                .redact(&String::from_utf8_lossy(&result.stderr))
                .into_bytes();
        }

        if must_succeed && !result.success() {
            return Err(RuncapError::CommandFailed {
                command: redactor.redact(&argv.display_line()),
                status: result.status,
                output: redactor.redact(&compose_output(&result)),
            });
        }

        Ok(result)
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Diagnostic text for a failed command: both streams, labelled, skipping
/// whichever is empty.
fn compose_output(result: &CommandResult) -> String {
    let mut out = String::new();

    let stdout = result.stdout_str();
    if !stdout.trim().is_empty() {
        out.push_str("stdout:\n");
        out.push_str(stdout.trim_end());
        out.push('\n');
    }

    let stderr = result.stderr_str();
    if !stderr.trim().is_empty() {
        out.push_str("stderr:\n");
        out.push_str(stderr.trim_end());
        out.push('\n');
    }

    out
}

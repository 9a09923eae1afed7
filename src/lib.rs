// src/lib.rs

pub mod argv;
pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod redact;
pub mod sink;

pub use command::{CommandResult, CommandSpec, ProcessStatus};
pub use errors::{Result, RuncapError};
pub use exec::Executor;

/// Run `spec` with a default-configured [`Executor`], returning a
/// [`CommandResult`] for any exit status.
///
/// This is the non-raising entry point: a failing command is reported through
/// `result.success()`, not through `Err` — unless the spec itself sets
/// `must_succeed`. Construction problems (an invalid environment variable
/// name) are still errors, raised before any process is spawned.
///
/// ```no_run
/// # async fn demo() -> runcap::Result<()> {
/// use runcap::CommandSpec;
///
/// let result = runcap::run(CommandSpec::new("git").arg("status")).await?;
/// if !result.success() {
///     eprintln!("git status failed: {}", result.status);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run(spec: CommandSpec) -> Result<CommandResult> {
    Executor::default().run(spec).await
}

/// Like [`run`], but treat any failing status as an error.
///
/// Equivalent to [`run`] with `must_succeed` forced true: the returned error
/// carries the redacted command line, the exit status and the redacted
/// captured output of both streams.
pub async fn run_checked(spec: CommandSpec) -> Result<CommandResult> {
    Executor::default().run_checked(spec).await
}

// src/command.rs

//! Command specification and result types.
//!
//! A [`CommandSpec`] describes one child-process invocation and is consumed
//! once by the executor. A [`CommandResult`] is produced exactly once per
//! invocation and is immutable afterwards.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Specification of a single child-process invocation.
///
/// Built fluently:
///
/// ```no_run
/// use runcap::CommandSpec;
///
/// let spec = CommandSpec::new("tar")
///     .arg("-xzf")
///     .arg("bundle.tar.gz")
///     .env("LC_ALL", "C")
///     .unset_env("TAR_OPTIONS")
///     .print_stdout(true);
/// ```
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Executable name or path. Names containing a path separator are used
    /// verbatim; bare names are resolved against the search path.
    pub program: String,

    /// Ordered argument list, passed as discrete argv entries. Never joined
    /// into a shell string.
    pub args: Vec<String>,

    /// Environment mapping. `Some(value)` injects the variable via the `env`
    /// wrapper binary; `None` force-unsets it for the child.
    pub env: BTreeMap<String, Option<String>>,

    /// Re-invoke through `sudo -E --`.
    pub sudo: bool,

    /// Treat any failing status as an error even on the non-raising entry
    /// point.
    pub must_succeed: bool,

    /// Echo redacted stdout chunks live while still buffering them.
    pub print_stdout: bool,

    /// Echo redacted stderr chunks live (on by default).
    pub print_stderr: bool,

    /// Print the redacted command line before running.
    pub verbose: bool,

    /// Strings masked on every human-facing surface.
    pub secrets: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            sudo: false,
            must_succeed: false,
            print_stdout: false,
            print_stderr: true,
            verbose: false,
            secrets: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Inject an environment variable for the child.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), Some(value.into()));
        self
    }

    /// Force-unset an environment variable for the child.
    ///
    /// The variable is omitted from the `env` wrapper list and removed from
    /// the child's inherited environment, so the child sees it as unset, not
    /// as empty.
    pub fn unset_env(mut self, name: impl Into<String>) -> Self {
        self.env.insert(name.into(), None);
        self
    }

    pub fn sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }

    pub fn must_succeed(mut self, must_succeed: bool) -> Self {
        self.must_succeed = must_succeed;
        self
    }

    pub fn print_stdout(mut self, print_stdout: bool) -> Self {
        self.print_stdout = print_stdout;
        self
    }

    pub fn print_stderr(mut self, print_stderr: bool) -> Self {
        self.print_stderr = print_stderr;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Add a string to mask wherever output becomes observable.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secrets.push(secret.into());
        self
    }

    /// The `PATH`-style search list carried by this spec, if it defines one.
    pub fn search_path(&self) -> Option<&str> {
        self.env.get("PATH").and_then(|v| v.as_deref())
    }
}

/// Terminal status of the child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// The process exited normally with the given code.
    Exited(i32),
    /// The process was terminated by a signal.
    Signaled(i32),
}

impl ProcessStatus {
    /// Conventional status for a program that could not be spawned.
    pub const NOT_FOUND: ProcessStatus = ProcessStatus::Exited(127);

    /// True iff the process exited normally with status zero.
    pub fn success(self) -> bool {
        matches!(self, ProcessStatus::Exited(0))
    }

    /// Exit code for a normal exit; `None` for signal termination.
    pub fn code(self) -> Option<i32> {
        match self {
            ProcessStatus::Exited(code) => Some(code),
            ProcessStatus::Signaled(_) => None,
        }
    }

    /// Shell-convention exit code: the code itself, or `128 + signal`.
    pub fn shell_code(self) -> i32 {
        match self {
            ProcessStatus::Exited(code) => code,
            ProcessStatus::Signaled(sig) => 128 + sig,
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Exited(code) => write!(f, "exit status {code}"),
            ProcessStatus::Signaled(sig) => write!(f, "terminated by signal {sig}"),
        }
    }
}

impl From<std::process::ExitStatus> for ProcessStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return ProcessStatus::Signaled(sig);
            }
        }
        ProcessStatus::Exited(status.code().unwrap_or(-1))
    }
}

/// Captured outcome of a completed invocation.
///
/// The buffers hold the full raw bytes the child emitted, regardless of echo
/// settings. They are unredacted unless `redact_captured` is configured.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: ProcessStatus,
}

impl CommandResult {
    /// True iff the process exited normally with status zero.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Captured stdout as text (lossy for non-UTF-8 bytes).
    pub fn stdout_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Captured stderr as text (lossy for non-UTF-8 bytes).
    pub fn stderr_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

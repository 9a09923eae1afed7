// src/exec/launcher.rs

//! Child process creation.

use std::io;
use std::process::Stdio;

use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::debug;

use crate::argv::ResolvedArgv;
use crate::command::CommandSpec;

/// A spawned child with both output pipes taken.
///
/// `child` is the waiter handle. It must not be awaited until both pipe
/// readers have observed end-of-stream; reaping the process first can lose
/// buffered-but-unread output.
pub struct SpawnedProcess {
    pub child: Child,
    pub stdout: ChildStdout,
    pub stderr: ChildStderr,
}

/// Spawn `argv` with stdout and stderr piped.
///
/// No shell is involved: the first argv entry is executed directly and the
/// rest are passed as discrete arguments. Injected variables already ride on
/// the argv via the `env` wrapper; the only environment manipulation here is
/// removing absent-valued entries, so "force unset" holds even when the
/// parent process carries the variable.
pub fn spawn(argv: &ResolvedArgv, spec: &CommandSpec) -> io::Result<SpawnedProcess> {
    let mut cmd = Command::new(argv.program());
    cmd.args(argv.args())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    for (name, value) in spec.env.iter() {
        if value.is_none() {
            cmd.env_remove(name);
        }
    }

    let mut child = cmd.spawn()?;
    debug!(program = %argv.program(), "child process spawned");

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout pipe missing"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("child stderr pipe missing"))?;

    Ok(SpawnedProcess {
        child,
        stdout,
        stderr,
    })
}

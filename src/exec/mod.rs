// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running a [`CommandSpec`] using
//! `tokio::process::Command` and producing a [`CommandResult`].
//!
//! - [`launcher`] creates the child process with both output streams piped.
//! - [`pump`] drains one pipe per Tokio task; two pumps per invocation is
//!   the only concurrency in the engine.
//! - [`runner`] owns the [`Executor`] that ties argv construction, capture,
//!   redaction and result assembly together.
//!
//! [`CommandSpec`]: crate::command::CommandSpec
//! [`CommandResult`]: crate::command::CommandResult

pub mod launcher;
pub mod pump;
pub mod runner;

pub use runner::Executor;

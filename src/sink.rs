// src/sink.rs

//! Injectable byte sinks for live echo.
//!
//! The pumps write already-redacted chunks to an [`OutputSink`] instead of a
//! hardcoded standard stream, so tests can capture echoed output
//! deterministically.

use std::io::Write;

/// Destination for live-echoed output chunks.
pub trait OutputSink: Send + Sync {
    /// Write one chunk, verbatim. Chunks are never reflowed or line-buffered,
    /// which keeps carriage-return progress indicators intact.
    fn write_chunk(&self, chunk: &str);
}

/// Echoes to the process's own stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_chunk(&self, chunk: &str) {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(chunk.as_bytes());
        let _ = out.flush();
    }
}

/// Echoes to the process's own stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl OutputSink for StderrSink {
    fn write_chunk(&self, chunk: &str) {
        let mut out = std::io::stderr().lock();
        let _ = out.write_all(chunk.as_bytes());
        let _ = out.flush();
    }
}

// src/exec/pump.rs

//! Concurrent pipe draining.
//!
//! One pump per stream, each running as its own Tokio task. Draining both
//! pipes at the same time is what prevents the classic pipe deadlock: a child
//! blocked writing into a full stderr buffer while the parent is blocked
//! reading stdout, each waiting on the other indefinitely. With two
//! independent pumps the hazard disappears regardless of output volume.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::redact::Redactor;
use crate::sink::OutputSink;

/// Read buffer size per `read` call. Chunk boundaries follow whatever the
/// pipe delivers; they are not aligned to lines.
const READ_BUF_SIZE: usize = 4096;

/// Spawn a pump that drains `source` until end-of-stream and returns the
/// accumulated raw bytes.
///
/// Every chunk is appended verbatim to the buffer regardless of echo
/// configuration. When `echo` is set, the chunk is additionally redacted and
/// written to the sink without any reflow, so a chunk beginning with a
/// carriage return (an in-place progress indicator) passes through unchanged.
///
/// A read error ends the pump as if the stream had closed; everything read up
/// to that point stays in the buffer.
pub fn spawn_pump<R>(
    mut source: R,
    echo: Option<Arc<dyn OutputSink>>,
    redactor: Arc<Redactor>,
) -> JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buffer: Vec<u8> = Vec::new();
        let mut chunk = vec![0u8; READ_BUF_SIZE];

        loop {
            match source.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    buffer.extend_from_slice(&chunk[..n]);

                    if let Some(ref sink) = echo {
                        let text = String::from_utf8_lossy(&chunk[..n]);
                        sink.write_chunk(&redactor.redact(&text));
                    }
                }
                Err(err) => {
                    debug!(error = %err, "pipe read failed; treating stream as ended");
                    break;
                }
            }
        }

        buffer
    })
}

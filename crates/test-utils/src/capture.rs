use std::sync::{Arc, Mutex};

use runcap::sink::OutputSink;

/// An `OutputSink` that records every echoed chunk.
///
/// Cloneable handle: the executor holds one clone, the test keeps another and
/// inspects [`contents`](CaptureSink::contents) afterwards.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    chunks: Arc<Mutex<String>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything echoed so far, in arrival order.
    pub fn contents(&self) -> String {
        self.chunks.lock().unwrap().clone()
    }
}

impl OutputSink for CaptureSink {
    fn write_chunk(&self, chunk: &str) {
        self.chunks.lock().unwrap().push_str(chunk);
    }
}

//! In-memory sink for capturing records

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects records in a shared buffer
///
/// Clones share the same buffer, so one clone can be handed to a logger while
/// another is kept to inspect what was written.
///
/// # Example
///
/// ```
/// use rust_logs::{Logger, LoggerConfig, MemorySink};
///
/// let sink = MemorySink::new();
/// let logger = Logger::with_sinks(&LoggerConfig::default(), vec![Box::new(sink.clone())], Vec::new());
/// logger.info("hello");
/// assert_eq!(sink.lines().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written records split on line endings
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&mut self, record: &[u8]) -> Result<()> {
        self.buffer.lock().extend_from_slice(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

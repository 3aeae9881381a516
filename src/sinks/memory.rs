//! In-memory sink implementation

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// A shared in-memory buffer.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to the service.
///
/// # Example
///
/// ```
/// use log_service::{MemorySink, Sink};
///
/// let buffer = MemorySink::new();
/// let mut handle = buffer.clone();
/// handle.write_line("svc | ts | INFO | hello\n").unwrap();
///
/// assert_eq!(buffer.lines(), vec!["svc | ts | INFO | hello"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.buffer.lock().extend_from_slice(line.as_bytes());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

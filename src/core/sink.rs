//! Sink trait for log output destinations

use super::error::Result;

/// A byte-stream destination that accepts whole, already-formatted lines.
///
/// A service owns exactly one sink at a time. The writer thread and the fatal
/// path both reach it through the same lock, so `write_line` is never called
/// concurrently.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl Sink for Box<dyn Sink> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

//! Adapter sink over any `std::io::Write`

use crate::core::{LogServiceError, Result, Sink};
use std::io::Write;

/// Wraps an arbitrary byte stream, e.g. a `TcpStream`, a pipe or a `Vec<u8>`.
pub struct WriterSink<W: Write + Send> {
    inner: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self::named(inner, "writer")
    }

    pub fn named(inner: W, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.inner.write_all(line.as_bytes()).map_err(|e| {
            LogServiceError::io_operation("writing log line", format!("sink '{}'", self.name), e)
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| {
            LogServiceError::io_operation("flushing sink", format!("sink '{}'", self.name), e)
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

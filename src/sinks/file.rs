//! File sink implementation

use crate::core::{LogServiceError, Result, Sink};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends lines to a file.
///
/// Output is buffered; the service flushes on [`LogService::flush`],
/// shutdown and the fatal path.
///
/// [`LogService::flush`]: crate::LogService::flush
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    locked: bool,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LogServiceError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            locked: false,
        })
    }

    /// Open the file and hold an exclusive advisory lock on it, so another
    /// process using the same path cannot interleave lines with this one.
    pub fn exclusive(path: impl Into<PathBuf>) -> Result<Self> {
        let mut sink = Self::new(path)?;
        sink.writer
            .get_ref()
            .try_lock_exclusive()
            .map_err(|_| LogServiceError::sink("file", format!("'{}' is locked", sink.path.display())))?;
        sink.locked = true;
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
        if self.locked {
            let _ = FileExt::unlock(self.writer.get_ref());
        }
    }
}

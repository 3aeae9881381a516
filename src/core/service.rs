//! Log service implementation
//!
//! A [`LogService`] owns one writer thread. Producers hand events to it over a
//! zero-capacity channel, so every non-fatal call blocks until the writer has
//! taken the event. The writer is the only code that touches the sink for
//! non-fatal events, which keeps lines whole and in acceptance order.

use super::{
    config::LogServiceConfig,
    error::{LogServiceError, Result},
    formatter::format_event,
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::ServiceMetrics,
    sink::Sink,
    time_layout::TimeLayout,
};
use crate::sinks::ConsoleSink;
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default time [`LogService::shutdown`] waits for when the service is dropped.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Exit status used by [`LogService::fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// Exit status used when the sink fails or the writer loses its channel.
pub const FAILURE_EXIT_CODE: i32 = 2;

enum Message {
    Event(LogEvent),
    /// Barrier: acknowledged once everything queued before it is written.
    Flush(Sender<()>),
}

struct Shared {
    config: RwLock<LogServiceConfig>,
    sink: Mutex<Box<dyn Sink>>,
    metrics: ServiceMetrics,
    stopping: AtomicBool,
}

impl Shared {
    fn render(&self, event: &LogEvent) -> String {
        let config = self.config.read();
        format_event(&config.service_name, &config.time_layout, event)
    }

    fn write_event(&self, event: &LogEvent) -> Result<()> {
        self.metrics.record_accepted();

        // min_level is read per event so a later set_level applies immediately
        let line = {
            let config = self.config.read();
            if event.level < config.min_level {
                self.metrics.record_filtered();
                return Ok(());
            }
            format_event(&config.service_name, &config.time_layout, event)
        };

        self.sink.lock().write_line(&line)?;
        self.metrics.record_written();
        Ok(())
    }

    fn flush_sink(&self) -> Result<()> {
        self.sink.lock().flush()
    }
}

pub struct LogService {
    shared: Arc<Shared>,
    sender: RwLock<Option<Sender<Message>>>,
    writer: Mutex<Option<thread::JoinHandle<()>>>,
}

impl LogService {
    /// Start a service with default configuration writing to stdout.
    ///
    /// # Example
    ///
    /// ```
    /// use log_service::{LogLevel, LogService, MemorySink};
    ///
    /// let buffer = MemorySink::new();
    /// let service = LogService::new();
    /// service
    ///     .set_service_name("my-logger")
    ///     .set_level(LogLevel::Info)
    ///     .set_output(buffer.clone());
    ///
    /// service.debug("x");
    /// service.info("y");
    /// service.flush().unwrap();
    ///
    /// assert!(buffer.contents().contains("my-logger"));
    /// assert!(buffer.contents().contains("| INFO | y"));
    /// assert!(!buffer.contents().contains("| x"));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LogServiceConfig::default())
    }

    /// Start a service from an upfront configuration, writing to stdout.
    #[must_use]
    pub fn with_config(config: LogServiceConfig) -> Self {
        Self::with_config_and_sink(config, ConsoleSink::stdout())
    }

    /// Start a service from an upfront configuration and sink.
    #[must_use]
    pub fn with_config_and_sink<S: Sink + 'static>(config: LogServiceConfig, sink: S) -> Self {
        let (sender, receiver) = bounded(0);
        let shared = Arc::new(Shared {
            config: RwLock::new(config),
            sink: Mutex::new(Box::new(sink)),
            metrics: ServiceMetrics::new(),
            stopping: AtomicBool::new(false),
        });
        let shared_clone = Arc::clone(&shared);

        let handle = thread::Builder::new()
            .name("log-service-writer".to_string())
            .spawn(move || Self::run(&shared_clone, &receiver))
            .unwrap_or_else(|e| {
                escalate(LogServiceError::io_operation(
                    "starting writer thread",
                    "thread spawn failed",
                    e,
                ))
            });

        Self {
            shared,
            sender: RwLock::new(Some(sender)),
            writer: Mutex::new(Some(handle)),
        }
    }

    /// Writer loop: the single consumer of the event channel.
    fn run(shared: &Shared, receiver: &Receiver<Message>) {
        loop {
            match receiver.recv() {
                Ok(Message::Event(event)) => {
                    if let Err(e) = shared.write_event(&event) {
                        escalate(e);
                    }
                }
                Ok(Message::Flush(ack)) => {
                    if let Err(e) = shared.flush_sink() {
                        escalate(e);
                    }
                    let _ = ack.send(());
                }
                Err(_) => {
                    if shared.stopping.load(Ordering::Acquire) {
                        break;
                    }
                    escalate(LogServiceError::ChannelClosed);
                }
            }
        }
    }

    fn submit(&self, message: Message) -> bool {
        // Clone so the lock is not held across the blocking send; shutdown
        // must be able to take the sender while producers are stalled.
        let sender = self.sender.read().clone();
        match sender {
            // Rendezvous: returns only once the writer has taken the message
            Some(sender) => {
                if sender.send(message).is_err() {
                    escalate(LogServiceError::ChannelClosed);
                }
                true
            }
            // Stopped: later calls are ignored
            None => false,
        }
    }

    /// Set the layout used to render the timestamp column.
    pub fn set_time_layout(&self, layout: impl Into<TimeLayout>) -> &Self {
        self.shared.config.write().time_layout = layout.into();
        self
    }

    /// Set the name written in the first column of every line.
    pub fn set_service_name(&self, name: impl Into<String>) -> &Self {
        self.shared.config.write().service_name = name.into();
        self
    }

    /// Set the minimum level; events below it are dropped by the writer.
    pub fn set_level(&self, level: LogLevel) -> &Self {
        self.shared.config.write().min_level = level;
        self
    }

    /// Set the minimum level by ordinal. Values outside `0..=4` become `Error`.
    pub fn set_level_value(&self, value: i64) -> &Self {
        self.set_level(LogLevel::coerce(value))
    }

    /// Set the minimum level by name. Unknown names become `Error`.
    pub fn set_level_name(&self, name: &str) -> &Self {
        self.set_level(LogLevel::coerce_name(name))
    }

    /// Replace the sink. The previous sink is flushed before it is dropped.
    pub fn set_output<S: Sink + 'static>(&self, sink: S) -> &Self {
        let mut previous = {
            let mut guard = self.shared.sink.lock();
            std::mem::replace(&mut *guard, Box::new(sink))
        };
        if let Err(e) = previous.flush() {
            eprintln!(
                "[LOG SERVICE WARNING] Failed to flush replaced sink '{}': {}",
                previous.name(),
                e
            );
        }
        self
    }

    /// Current minimum level
    pub fn level(&self) -> LogLevel {
        self.shared.config.read().min_level
    }

    /// Current service name
    pub fn service_name(&self) -> String {
        self.shared.config.read().service_name.clone()
    }

    /// Current timestamp layout
    pub fn time_layout(&self) -> TimeLayout {
        self.shared.config.read().time_layout.clone()
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> LogServiceConfig {
        self.shared.config.read().clone()
    }

    /// Counters for events accepted, written, filtered and fatal lines
    pub fn metrics(&self) -> &ServiceMetrics {
        &self.shared.metrics
    }

    /// `false` once [`shutdown`](Self::shutdown) has closed the channel
    pub fn is_running(&self) -> bool {
        self.sender.read().is_some()
    }

    /// Emit a message at `level`. `Fatal` takes the fatal path and exits.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let event = LogEvent::new(level, message);
        if level == LogLevel::Fatal {
            self.exit_fatal(&event);
        }
        self.submit(Message::Event(event));
    }

    /// Emit pre-interpolated format arguments at `level`.
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.log(level, fmt::format(args));
    }

    /// Emit a debug-level message.
    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Debug, args);
    }

    /// Emit an info-level message.
    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    /// Emit a warning-level message.
    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warning, args);
    }

    /// Emit an error-level message.
    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }

    /// Write `message` synchronously, bypassing the queue and the level
    /// filter, then exit the process with status 1.
    pub fn fatal(&self, message: impl Into<String>) -> ! {
        self.exit_fatal(&LogEvent::new(LogLevel::Fatal, message))
    }

    /// Formatted variant of [`fatal`](Self::fatal).
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.exit_fatal(&LogEvent::from_args(LogLevel::Fatal, args))
    }

    fn exit_fatal(&self, event: &LogEvent) -> ! {
        if let Err(e) = self.write_fatal(event) {
            escalate(e);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Writes under the sink lock, so the line cannot be split by the writer
    /// thread. Which of the two lands first is still a race.
    fn write_fatal(&self, event: &LogEvent) -> Result<()> {
        let line = self.shared.render(event);
        let mut sink = self.shared.sink.lock();
        sink.write_line(&line)?;
        sink.flush()?;
        self.shared.metrics.record_fatal();
        Ok(())
    }

    /// Block until every event accepted before this call has been written,
    /// then flush the sink.
    pub fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = bounded(1);
        if self.submit(Message::Flush(ack_tx)) {
            ack_rx
                .recv()
                .map_err(|_| LogServiceError::ChannelClosed)?;
            return Ok(());
        }
        self.shared.flush_sink()
    }

    /// Stop the writer after it drains, waiting at most `timeout` for it and
    /// again at most `timeout` for the final flush.
    ///
    /// Non-fatal calls made after shutdown are ignored. Producers already
    /// blocked in the hand-off stay blocked until the writer takes their event.
    /// Returns `false` if the writer did not finish in time or the final flush
    /// failed or could not get the sink.
    ///
    /// # Example
    ///
    /// ```
    /// use log_service::{LogService, MemorySink, DEFAULT_SHUTDOWN_TIMEOUT};
    ///
    /// let buffer = MemorySink::new();
    /// let service = LogService::new();
    /// service.set_output(buffer.clone());
    ///
    /// service.error("last words");
    /// assert!(service.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
    /// assert!(!service.is_running());
    ///
    /// service.error("ignored");
    /// assert_eq!(buffer.lines().len(), 1);
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> bool {
        self.shared.stopping.store(true, Ordering::Release);

        // Closing the channel lets the writer finish its current event and exit
        drop(self.sender.write().take());

        let handle = self.writer.lock().take();
        if let Some(handle) = handle {
            let start = std::time::Instant::now();

            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOG SERVICE ERROR] Writer thread panicked during shutdown: {:?}",
                            e
                        );
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOG SERVICE WARNING] Writer thread did not finish within {:?}. \
                         Some lines may be lost.",
                        timeout
                    );
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        // A writer that timed out earlier may still hold the sink
        let Some(mut sink) = self.shared.sink.try_lock_for(timeout) else {
            eprintln!(
                "[LOG SERVICE WARNING] Sink still busy after {:?}; skipping final flush.",
                timeout
            );
            return false;
        };
        if let Err(e) = sink.flush() {
            eprintln!("[LOG SERVICE ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        true
    }
}

impl Default for LogService {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogService {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

impl fmt::Debug for LogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogService")
            .field("config", &*self.shared.config.read())
            .field("running", &self.is_running())
            .finish()
    }
}

/// Unrecoverable failure: report on stderr and end the process.
fn escalate(err: LogServiceError) -> ! {
    eprintln!("[LOG SERVICE CRITICAL] {}. Terminating process.", err);
    std::process::exit(FAILURE_EXIT_CODE)
}

//! # Leveled Logger
//!
//! A small leveled logger for command-line programs. Every message is a
//! [`LogRecord`]: it starts with a timestamp, the level tag and the process
//! rank, collects values appended with `<<`, and is written out as one line
//! when the record is dropped.
//!
//! ```no_run
//! use utilkit::core::logger::log_info;
//!
//! let files = vec!["a.txt", "b.txt"];
//! log_info() << "Processing" << files.len() << "files:" << &files;
//! ```
//!
//! Info and debug lines go to standard output, warnings and errors to
//! standard error. An error record terminates the process after it has been
//! written, together with a backtrace.
//!
//! ## Ranks
//!
//! Programs started as several cooperating processes usually want only one of
//! them to talk. A [`Logger`] knows the rank of the current process and the
//! rank whose messages are displayed; records from other ranks are dropped
//! unless they are broadcast or the logger is told to show all ranks.
//!
//! ## Compile-time levels
//!
//! The free functions [`log_warning`], [`log_info`] and [`log_debug`] return a
//! [`NoLogRecord`] when their level is disabled at build time (see
//! `build.rs`). Call sites compile unchanged either way.

mod loggable;
mod record;

pub use loggable::{Loggable, NoSpace, Space};
pub use record::{LogRecord, NoLogRecord};

use crate::constants::{LOG_TIME_PATTERN, NO_RANK_PLACEHOLDER};
use crate::core::time_utils;
use lazy_static::lazy_static;
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

lazy_static! {
    static ref GLOBAL_LOGGER: Logger = Logger::new();
}

/// Sentinel stored in `Logger::current_rank` while no rank is configured.
const UNSET_RANK: i64 = -1;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Tracing detail.
    Debug,
    /// Normal progress messages.
    Info,
    /// Something looks wrong but work goes on.
    Warning,
    /// A fatal error. The process is terminated after the record is written.
    Error,
}

impl Level {
    /// The tag written after the timestamp; all tags have the same width.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Debug => "Debug: ",
            Self::Info => "Info:  ",
            Self::Warning => "Warn:  ",
            Self::Error => "Error: ",
        }
    }

    /// The console stream records of this level are written to.
    pub fn stream(self) -> Stream {
        match self {
            Self::Debug | Self::Info => Stream::Stdout,
            Self::Warning | Self::Error => Stream::Stderr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Destination of finished log lines.
pub trait LogSink: Send + Sync {
    /// Writes one complete line (without the trailing newline).
    fn write_line(&self, stream: Stream, line: &str);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write_line(&self, stream: Stream, line: &str) {
        (**self).write_line(stream, line);
    }
}

/// Writes to the standard output and error streams of the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, stream: Stream, line: &str) {
        // A logger has nowhere to report its own output failures.
        let _ = match stream {
            Stream::Stdout => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{}", line).and_then(|()| out.flush())
            }
            Stream::Stderr => {
                let mut err = std::io::stderr().lock();
                writeln!(err, "{}", line).and_then(|()| err.flush())
            }
        };
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all lines written so far.
    pub fn take(&self) -> Vec<(Stream, String)> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, stream: Stream, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((stream, line.to_string()));
    }
}

/// Logging context: rank filtering and the output sink.
///
/// The rank settings are read whenever a record is finished, so they may be
/// changed at any time through a shared reference.
pub struct Logger {
    display_rank: AtomicU32,
    current_rank: AtomicI64,
    log_all_ranks: AtomicBool,
    sink: Box<dyn LogSink>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("display_rank", &self.display_rank())
            .field("current_rank", &self.current_rank())
            .field("log_all_ranks", &self.log_all_ranks())
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// A logger writing to the console with no rank configured.
    pub fn new() -> Self {
        Self::with_sink(ConsoleSink)
    }

    /// A logger writing to `sink` with no rank configured.
    pub fn with_sink(sink: impl LogSink + 'static) -> Self {
        Self {
            display_rank: AtomicU32::new(0),
            current_rank: AtomicI64::new(UNSET_RANK),
            log_all_ranks: AtomicBool::new(false),
            sink: Box::new(sink),
        }
    }

    /// The process-wide logger used by [`log_error`], [`log_warning`],
    /// [`log_info`] and [`log_debug`].
    pub fn global() -> &'static Self {
        &GLOBAL_LOGGER
    }

    // --- Configuration ---

    /// The rank whose records are shown.
    pub fn display_rank(&self) -> u32 {
        self.display_rank.load(Ordering::Relaxed)
    }

    /// Selects the rank whose records are shown.
    pub fn set_display_rank(&self, rank: u32) {
        self.display_rank.store(rank, Ordering::Relaxed);
    }

    /// The rank of this process, if any.
    pub fn current_rank(&self) -> Option<u32> {
        u32::try_from(self.current_rank.load(Ordering::Relaxed)).ok()
    }

    /// Sets the rank of this process; `None` means the program is not split into ranks.
    pub fn set_current_rank(&self, rank: Option<u32>) {
        let stored = rank.map_or(UNSET_RANK, i64::from);
        self.current_rank.store(stored, Ordering::Relaxed);
    }

    /// Whether records of every rank are shown.
    pub fn log_all_ranks(&self) -> bool {
        self.log_all_ranks.load(Ordering::Relaxed)
    }

    /// Shows the records of every rank, not only those of the display rank.
    pub fn set_log_all_ranks(&self, all: bool) {
        self.log_all_ranks.store(all, Ordering::Relaxed);
    }

    // --- Records ---

    /// Starts a new record of the given level.
    pub fn record(&self, level: Level) -> LogRecord<'_> {
        LogRecord::new(self, level, self.header(level))
    }

    /// Starts a fatal error record. Error records are always broadcast.
    pub fn error(&self) -> LogRecord<'_> {
        self.record(Level::Error).broadcast()
    }

    /// Starts a warning record.
    pub fn warning(&self) -> LogRecord<'_> {
        self.record(Level::Warning)
    }

    /// Starts an info record.
    pub fn info(&self) -> LogRecord<'_> {
        self.record(Level::Info)
    }

    /// Starts a debug record.
    pub fn debug(&self) -> LogRecord<'_> {
        self.record(Level::Debug)
    }

    /// Whether a finished record should be written.
    fn should_print(&self, broadcast: bool) -> bool {
        if broadcast || self.log_all_ranks() {
            return true;
        }
        match self.current_rank() {
            None => true,
            Some(rank) => rank == self.display_rank(),
        }
    }

    fn header(&self, level: Level) -> String {
        let timestamp = time_utils::now_as_string(LOG_TIME_PATTERN).unwrap_or_default();
        let rank = self
            .current_rank()
            .map_or_else(|| NO_RANK_PLACEHOLDER.to_string(), |r| r.to_string());
        format!("{}, {}[{}] ", timestamp, level.tag(), rank)
    }

    /// Writes a finished record.
    ///
    /// Error records are always written: the process ends right after them.
    pub(crate) fn emit(&self, level: Level, broadcast: bool, line: &str) {
        if level == Level::Error || self.should_print(broadcast) {
            self.sink.write_line(level.stream(), line);
        }
    }
}

// --- Process-wide shortcuts ---

/// Starts a fatal error record on the global logger.
///
/// When the record is dropped it is written to standard error, followed by a
/// backtrace, and the process is terminated.
pub fn log_error() -> LogRecord<'static> {
    Logger::global().error()
}

/// Starts a warning record on the global logger.
#[cfg(utilkit_log_warning)]
pub fn log_warning() -> LogRecord<'static> {
    Logger::global().warning()
}

/// Warnings are disabled in this build.
#[cfg(not(utilkit_log_warning))]
pub fn log_warning() -> NoLogRecord {
    NoLogRecord
}

/// Starts an info record on the global logger.
#[cfg(utilkit_log_info)]
pub fn log_info() -> LogRecord<'static> {
    Logger::global().info()
}

/// Info messages are disabled in this build.
#[cfg(not(utilkit_log_info))]
pub fn log_info() -> NoLogRecord {
    NoLogRecord
}

/// Starts a debug record on the global logger.
#[cfg(utilkit_log_debug)]
pub fn log_debug() -> LogRecord<'static> {
    Logger::global().debug()
}

/// Debug messages are disabled in this build.
#[cfg(not(utilkit_log_debug))]
pub fn log_debug() -> NoLogRecord {
    NoLogRecord
}

/// The maximum level compiled in: 0 (errors only) to 3 (debug).
pub fn compiled_log_level() -> u8 {
    env!("UTILKIT_LOG_LEVEL_EFFECTIVE").parse().unwrap_or(3)
}

#[cfg(test)]
#[allow(unused_must_use)]
mod tests {
    use super::*;

    fn capturing_logger() -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Logger::with_sink(Arc::clone(&sink)), sink)
    }

    #[test]
    fn test_info_goes_to_stdout_once() {
        let (logger, sink) = capturing_logger();

        logger.info() << "hello" << 42;

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Stream::Stdout);
        assert!(lines[0].1.contains("Info:  [-] \"hello\" 42 "));
    }

    #[test]
    fn test_warning_goes_to_stderr() {
        let (logger, sink) = capturing_logger();

        logger.warning() << "careful";

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Stream::Stderr);
        assert!(lines[0].1.contains("Warn:  "));
    }

    #[test]
    fn test_record_flushes_when_dropped() {
        let (logger, sink) = capturing_logger();

        let record = logger.debug() << "pending";
        assert!(sink.take().is_empty());

        drop(record);
        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].1.ends_with("\"pending\" "));
    }

    #[test]
    fn test_moved_record_flushes_once() {
        let (logger, sink) = capturing_logger();

        let first = logger.info() << 1;
        let moved = first;
        let mut records = vec![moved];
        records.push(logger.info() << 2);
        drop(records);

        assert_eq!(sink.take().len(), 2);
    }

    #[test]
    fn test_header_has_timestamp_and_rank() {
        let (logger, sink) = capturing_logger();
        logger.set_current_rank(Some(3));
        logger.set_log_all_ranks(true);

        logger.info() << "x";

        let line = &sink.take()[0].1;
        let (timestamp, rest) = line.split_once(", ").unwrap();
        // "%a %b %d %X%.3f", e.g. "Sat Mar 07 09:05:02.042"
        assert_eq!(timestamp.len(), 23);
        assert!(rest.starts_with("Info:  [3] "));
    }

    #[test]
    fn test_rank_filtering() {
        let (logger, sink) = capturing_logger();
        logger.set_current_rank(Some(1));

        // Not the display rank.
        logger.info() << "hidden";
        assert!(sink.take().is_empty());

        logger.info().broadcast() << "broadcast";
        assert_eq!(sink.take().len(), 1);

        logger.set_display_rank(1);
        logger.info() << "shown";
        assert_eq!(sink.take().len(), 1);

        logger.set_display_rank(0);
        logger.set_log_all_ranks(true);
        logger.info() << "all ranks";
        assert_eq!(sink.take().len(), 1);
    }

    #[test]
    fn test_error_ignores_rank_filter() {
        let (logger, sink) = capturing_logger();
        logger.set_current_rank(Some(1));
        logger.set_display_rank(0);

        logger.emit(Level::Error, false, "fatal text");

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], (Stream::Stderr, "fatal text".to_string()));
    }

    #[test]
    fn test_unset_rank_always_prints() {
        let (logger, sink) = capturing_logger();
        logger.set_display_rank(5);

        logger.info() << "no rank";

        assert_eq!(logger.current_rank(), None);
        assert_eq!(sink.take().len(), 1);
    }

    #[test]
    fn test_level_streams_and_tags() {
        assert_eq!(Level::Debug.stream(), Stream::Stdout);
        assert_eq!(Level::Info.stream(), Stream::Stdout);
        assert_eq!(Level::Warning.stream(), Stream::Stderr);
        assert_eq!(Level::Error.stream(), Stream::Stderr);
        assert!(Level::Error > Level::Warning);
        assert_eq!(Level::Warning.tag().len(), Level::Debug.tag().len());
    }

    #[test]
    fn test_compiled_log_level_is_in_range() {
        assert!(compiled_log_level() <= 3);
    }
}

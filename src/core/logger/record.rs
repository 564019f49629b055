// src/core/logger/record.rs

use super::{Level, Loggable, Logger};
use crate::system::fatal;
use std::ops::Shl;

/// One log message under construction.
///
/// A record cannot be cloned. It is written exactly once, when it is
/// dropped; moving it around does not write it.
#[derive(Debug)]
pub struct LogRecord<'a> {
    logger: &'a Logger,
    level: Level,
    broadcast: bool,
    buffer: String,
    space: bool,
}

impl<'a> LogRecord<'a> {
    pub(super) fn new(logger: &'a Logger, level: Level, header: String) -> Self {
        Self {
            logger,
            level,
            broadcast: false,
            buffer: header,
            space: true,
        }
    }

    /// The level the record was started with.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The text collected so far, including the header.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Writes this record regardless of the rank settings.
    pub fn broadcast(mut self) -> Self {
        self.broadcast = true;
        self
    }

    /// Adds a space now and after every following value.
    pub fn space(mut self) -> Self {
        self.enable_space();
        self
    }

    /// Stops adding a space after each value.
    pub fn nospace(mut self) -> Self {
        self.disable_space();
        self
    }

    /// Appends a value; the method form of `record << value`.
    pub fn append<T: Loggable + ?Sized>(mut self, value: &T) -> Self {
        value.apply(&mut self);
        self
    }

    // --- Used by `Loggable` implementations ---

    /// Renders `value` and adds the trailing space if spaces are enabled.
    pub fn push_value<T: Loggable + ?Sized>(&mut self, value: &T) {
        value.render(&mut self.buffer);
        if self.space {
            self.buffer.push(' ');
        }
    }

    /// Puts a space after every following value.
    pub fn enable_space(&mut self) {
        self.space = true;
        self.buffer.push(' ');
    }

    /// Stops putting spaces between values.
    pub fn disable_space(&mut self) {
        self.space = false;
    }
}

impl<T: Loggable> Shl<T> for LogRecord<'_> {
    type Output = Self;

    fn shl(self, value: T) -> Self {
        self.append(&value)
    }
}

impl Drop for LogRecord<'_> {
    fn drop(&mut self) {
        let line = std::mem::take(&mut self.buffer);
        self.logger.emit(self.level, self.broadcast, &line);

        if self.level == Level::Error {
            fatal::abort_with_backtrace();
        }
    }
}

/// Stand-in for a record whose level is disabled at build time.
///
/// Accepts the same calls as [`LogRecord`] and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLogRecord;

impl NoLogRecord {
    /// No-op.
    pub fn broadcast(self) -> Self {
        self
    }

    /// No-op.
    pub fn space(self) -> Self {
        self
    }

    /// No-op.
    pub fn nospace(self) -> Self {
        self
    }

    /// Discards `_value`.
    pub fn append<T: Loggable + ?Sized>(self, _value: &T) -> Self {
        self
    }
}

impl<T: Loggable> Shl<T> for NoLogRecord {
    type Output = Self;

    fn shl(self, _value: T) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::super::{MemorySink, NoSpace, Space};
    use super::*;
    use std::sync::Arc;

    /// The text of a record without its header.
    fn body(record: &LogRecord<'_>) -> String {
        record
            .text()
            .split_once("] ")
            .map(|(_, body)| body.to_string())
            .unwrap_or_default()
    }

    fn quiet_logger() -> Logger {
        Logger::with_sink(Arc::new(MemorySink::new()))
    }

    #[test]
    fn test_nospace_and_space() {
        let logger = quiet_logger();

        let record = logger.info().nospace() << 1 << 2 << Space << 3;
        assert_eq!(body(&record), "12 3 ");

        let record = logger.info() << "a" << NoSpace << "b" << "c";
        assert_eq!(body(&record), "\"a\" \"b\"\"c\"");
    }

    #[test]
    fn test_append_method_matches_operator() {
        let logger = quiet_logger();

        let record = logger.info().append("x").append(&7u8);
        assert_eq!(body(&record), "\"x\" 7 ");
    }

    #[test]
    fn test_level_is_kept() {
        let logger = quiet_logger();
        assert_eq!(logger.warning().level(), Level::Warning);
        assert_eq!(logger.record(Level::Debug).level(), Level::Debug);
    }

    #[test]
    fn test_no_log_record_accepts_everything() {
        let record = NoLogRecord << "text" << 1.5 << vec![1, 2] << (1, "a") << Space;
        let _ = record.broadcast().nospace().space().append("more");
    }
}

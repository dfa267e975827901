// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type.
//!
//! A [`LogRecord`] is built for every call that passes the level check: it captures the
//! time, the call site and the calling thread, and accumulates the message parts as each
//! argument is reduced to text.  The [`formatter`](crate::formatter) turns it into a line, and
//! the record is dropped once the line is emitted.
//!
//! ```
//! use xtiloger::{CallSite, Level, LogRecord};
//!
//! let mut record = LogRecord::new(Level::Info, CallSite::new("src/main.rs", 7, "main"), chrono::Local::now());
//! record.log("Processing request ");
//! record.log_owned(format!("#{}", 42));
//! assert_eq!(record.message(), "Processing request #42");
//! ```

use crate::Level;
use crate::loggable::{LogBuilder, Loggable};
use chrono::{DateTime, Local};
use std::fmt::Display;
use std::panic::Location;

/// Where a logging call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// The caller's file and line.  The function name is unknown and left empty.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), "")
    }

    /// The last path component of [CallSite::file].
    pub fn file_name(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

/**
Identity of the thread that made a call.

The value of [ThreadMarker::Other] is an opaque identifier; it is stable for the life of a
thread and distinct between live threads, nothing more.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThreadMarker {
    Main,
    Other(String),
}

impl ThreadMarker {
    pub fn current() -> Self {
        let thread = std::thread::current();
        if thread.name() == Some("main") {
            return ThreadMarker::Main;
        }
        let debug = format!("{:?}", thread.id());
        let digits: String = debug.chars().filter(char::is_ascii_digit).collect();
        match digits.parse::<u64>() {
            Ok(n) => ThreadMarker::Other(format!("0x{:x}", n)),
            Err(_) => ThreadMarker::Other(debug),
        }
    }
}

impl Display for ThreadMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadMarker::Main => f.write_str("[Main]"),
            ThreadMarker::Other(id) => write!(f, "[Global]<{}>", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    parts: Vec<String>,
    level: Level,
    timestamp: DateTime<Local>,
    call_site: CallSite,
    thread: ThreadMarker,
}

impl LogRecord {
    /// A record for a call made now, on the current thread.
    pub fn new(level: Level, call_site: CallSite, timestamp: DateTime<Local>) -> Self {
        Self {
            parts: Vec::new(),
            level,
            timestamp,
            call_site,
            thread: ThreadMarker::current(),
        }
    }

    /// Appends a borrowed message part, copying it.
    pub fn log(&mut self, message: &str) {
        self.parts.push(message.to_string());
    }

    /// Appends an owned message part.
    pub fn log_owned(&mut self, message: String) {
        self.parts.push(message);
    }

    /// Append the default textual form of `value`.
    pub fn log_value(&mut self, value: &dyn Loggable) {
        value.log_all(self);
    }

    /// The message parts joined, with no separator.
    pub fn message(&self) -> String {
        self.parts.concat()
    }

    pub fn level(&self) -> Level {
        self.level
    }
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
    pub fn call_site(&self) -> CallSite {
        self.call_site
    }
    pub fn thread(&self) -> &ThreadMarker {
        &self.thread
    }
}

impl LogBuilder for LogRecord {
    #[inline]
    fn write(&mut self, message: &str) {
        self.log(message);
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in &self.parts {
            f.write_str(part)?;
        }
        Ok(())
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug, Clone, PartialEq/Eq, Hash: derived
- Display: the message parts, without metadata (the formatter owns the line layout)

NOT IMPLEMENTED:
- Default: a record without a call site or timestamp means nothing
- Ord/PartialOrd: no meaningful ordering for log records
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_directories() {
        assert_eq!(CallSite::new("src/a/b.rs", 1, "f").file_name(), "b.rs");
        assert_eq!(CallSite::new("C:\\src\\b.rs", 1, "f").file_name(), "b.rs");
        assert_eq!(CallSite::new("b.rs", 1, "f").file_name(), "b.rs");
    }

    #[test]
    fn caller_captures_this_file() {
        let site = CallSite::caller();
        assert_eq!(site.file_name(), "log_record.rs");
        assert!(site.line > 0);
    }

    #[test]
    fn spawned_threads_are_not_main() {
        let marker = std::thread::spawn(ThreadMarker::current).join().unwrap();
        let text = marker.to_string();
        assert!(text.starts_with("[Global]<0x"), "{text}");
        assert_eq!(ThreadMarker::Main.to_string(), "[Main]");
    }

    #[test]
    fn values_concatenate_without_separator() {
        let mut record = LogRecord::new(Level::Debug, CallSite::caller(), Local::now());
        record.log_value(&1u8);
        record.log_value(&"two");
        record.log_value(&3.5f64);
        assert_eq!(record.message(), "1two3.5");
        assert_eq!(record.to_string(), "1two3.5");
    }
}

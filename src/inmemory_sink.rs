// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! A [`Sink`] that captures lines in memory instead of printing them, for:
//!
//! - Unit testing code that logs through an [`Logger`](crate::Logger)
//! - Programmatically examining log output, e.g. to attach it to a bug report
//!
//! ## Architecture
//!
//! Lines are kept in a `Mutex<Vec<(Level, String)>>` so that several threads can log
//! concurrently while a reader drains a consistent snapshot.

use crate::Level;
use crate::sink::Sink;
use std::sync::{Mutex, PoisonError};

/// A sink that stores formatted lines in memory.
///
/// # Example
///
/// ```rust
/// use xtiloger::{InMemorySink, Logger, Level, CallSite};
/// use std::sync::Arc;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::with_root(dir.path(), "example");
/// let sink = Arc::new(InMemorySink::new());
/// logger.add_sink(sink.clone());
///
/// logger.warning(CallSite::new("src/lib.rs", 1, "run"), &[&"Something suspicious happened"]);
///
/// let logs = sink.drain_logs();
/// assert!(logs.contains("Something suspicious happened"));
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: Derived, required by Sink
// - Default: Derived, an empty buffer
// - Clone: NOT implemented - a copy would silently stop receiving lines
// - PartialEq/Eq/Hash: NOT implemented - mutex state comparison is problematic

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains all lines into a single string joined by newlines, clearing the buffer.
    ///
    /// ```rust
    /// use xtiloger::{InMemorySink, Level, Sink};
    ///
    /// let sink = InMemorySink::new();
    /// sink.write_line(Level::Info, "First message");
    /// sink.write_line(Level::Error, "Second message");
    /// assert_eq!(sink.drain_logs(), "First message\nSecond message");
    /// assert_eq!(sink.drain_logs(), "");
    /// ```
    pub fn drain_logs(&self) -> String {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        let result = lines
            .iter()
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        lines.clear();
        result
    }

    /// Drains the captured lines with their levels, clearing the buffer.
    pub fn drain(&self) -> Vec<(Level, String)> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for InMemorySink {
    fn write_line(&self, level: Level, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, line.to_string()));
    }

    fn prepare_to_die(&self) {
        // No-op since we're storing in memory, no flushing needed
    }
}

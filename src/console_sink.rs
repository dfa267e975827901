// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::Level;
use crate::sink::Sink;
use std::io::Write;

/**
Mirrors lines to stdout.

The logger only routes lines here in [BuildMode::Debug](crate::BuildMode::Debug).
Write failures (a closed pipe, say) are ignored: console output is best-effort.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConsoleSink {}

impl ConsoleSink {
    pub const fn new() -> Self {
        Self {}
    }

    /// Reports a fault of the logger itself on stderr.
    pub(crate) fn diagnostic(message: &str) {
        let mut lock = std::io::stderr().lock();
        let _ = writeln!(lock, "[XTILoger] {}", message);
    }
}

impl Sink for ConsoleSink {
    fn write_line(&self, _level: Level, line: &str) {
        let mut lock = std::io::stdout().lock();
        let _ = lock.write_all(line.as_bytes());
        let _ = lock.write_all(b"\n");
    }

    fn prepare_to_die(&self) {
        let _ = std::io::stdout().lock().flush();
    }
}

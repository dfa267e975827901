// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logger facade.
//!
//! A [`Logger`] ties the pipeline together: level check → formatting → rotation file append →
//! console and sink mirroring.  Every leveled call returns the line it produced (with a
//! trailing newline), or an empty string when the call was filtered.
//!
//! ```
//! use xtiloger::{BuildMode, CallSite, Level, Logger};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::with_root(dir.path(), "app").with_build_mode(BuildMode::Release);
//!
//! // release builds drop anything below Warning by default
//! assert_eq!(logger.info(CallSite::new("src/main.rs", 3, "main"), &[&"starting"]), "");
//!
//! let line = logger.error(CallSite::new("src/main.rs", 4, "main"), &[&"code ", &503]);
//! assert!(line.ends_with("main => code 503\n"));
//! assert_eq!(logger.list_log_files().len(), 1);
//! ```
//!
//! Most code logs through the [`info!`](crate::info), [`debug!`](crate::debug),
//! [`warning!`](crate::warning) and [`error!`](crate::error) macros, which capture the call
//! site automatically.

use crate::Level;
use crate::clock::{Clock, SystemClock};
use crate::config::{BuildMode, LoggerConfig};
use crate::console_sink::ConsoleSink;
use crate::error::LogError;
use crate::file_sink::{Appended, FileSink};
use crate::formatter::{format_line, format_template};
use crate::log_record::{CallSite, LogRecord};
use crate::loggable::Loggable;
use crate::sink::Sink;
use std::collections::BTreeSet;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Directory under the documents directory that holds every logger's files.
pub const ROOT_DIRECTORY: &str = "XTILoger";

/**
The default root for log directories: `<documents>/XTILoger`.

Falls back to `<home>/Documents`, then to the system temp directory when the platform has no
notion of either.
*/
pub fn default_root() -> PathBuf {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .unwrap_or_else(std::env::temp_dir)
        .join(ROOT_DIRECTORY)
}

/// A line that passed the level check.
struct Emitted {
    line: String,
    mirror_console: bool,
    persisted: Result<Appended, LogError>,
}

/**
A named logger writing to its own directory.

Loggers are `Send + Sync`; share one behind an `Arc` and log from any thread.
*/
#[derive(Debug)]
pub struct Logger {
    name: String,
    build_mode: BuildMode,
    config: RwLock<LoggerConfig>,
    file: FileSink,
    console: Arc<dyn Sink>,
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// A logger writing under `<documents>/XTILoger/<name>/`.
    pub fn new(name: &str) -> Self {
        Self::with_root(default_root(), name)
    }

    /**
    A logger writing under `<root>/<name>/`, or directly in `root` when `name` is empty.

    Nothing is created on disk until the first line is persisted.
    */
    pub fn with_root(root: impl AsRef<Path>, name: &str) -> Self {
        let root = root.as_ref();
        let directory = if name.is_empty() {
            root.to_path_buf()
        } else {
            root.join(name)
        };
        Self {
            name: name.to_string(),
            build_mode: BuildMode::current(),
            config: RwLock::new(LoggerConfig::default()),
            file: FileSink::new(directory),
            console: Arc::new(ConsoleSink::new()),
            sinks: RwLock::new(Vec::new()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Overrides the process build mode for this logger.
    pub fn with_build_mode(mut self, build_mode: BuildMode) -> Self {
        self.build_mode = build_mode;
        self
    }

    pub fn with_config(self, config: LoggerConfig) -> Self {
        self.set_config(config);
        self
    }

    /**
    Replaces the stdout [ConsoleSink].

    The console still only receives lines in [BuildMode::Debug] with `config.console` set;
    use [Self::add_sink] for a destination that sees every line.
    */
    pub fn with_console(mut self, console: Arc<dyn Sink>) -> Self {
        self.console = console;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build_mode(&self) -> BuildMode {
        self.build_mode
    }

    /// The threshold below which calls are dropped, per the build mode.
    pub fn effective_level(&self) -> Level {
        self.config().effective_level(self.build_mode)
    }

    /// A snapshot of the current configuration.
    pub fn config(&self) -> LoggerConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_config(&self, config: LoggerConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /**
    Edits the configuration in place.

    ```
    # let dir = tempfile::tempdir().unwrap();
    use xtiloger::{Level, Logger};
    let logger = Logger::with_root(dir.path(), "app");
    logger.update_config(|config| {
        config.save_file_level = Level::Error;
        config.file_pattern = "Y-M-D".parse().unwrap();
    });
    assert_eq!(logger.config().file_pattern.as_str(), "Y-M-D");
    ```
    */
    pub fn update_config<F: FnOnce(&mut LoggerConfig)>(&self, f: F) {
        f(&mut self.config.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// Adds a sink that mirrors every line passing the effective level.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }

    pub fn file_sink(&self) -> &FileSink {
        &self.file
    }

    /// The log directory, created if absent.
    pub fn log_directory(&self) -> PathBuf {
        self.file.log_directory().to_path_buf()
    }

    /// The current rotation file for `level`, created empty if absent.
    pub fn current_log_file_path(&self, level: Level) -> Option<PathBuf> {
        let pattern = self.config().file_pattern;
        self.file
            .resolve_writable_path(level, &pattern, self.clock.now().date_naive())
    }

    pub fn list_log_files(&self) -> BTreeSet<String> {
        self.file.list_log_files()
    }

    /// See [`FileSink::clear_all_log_files`]; not safe to run while this logger is in use.
    pub fn clear_all_log_files(&self) -> bool {
        self.file.clear_all_log_files()
    }

    #[inline]
    pub fn info(&self, site: CallSite, values: &[&dyn Loggable]) -> String {
        self.log(Level::Info, site, values)
    }

    #[inline]
    pub fn debug(&self, site: CallSite, values: &[&dyn Loggable]) -> String {
        self.log(Level::Debug, site, values)
    }

    #[inline]
    pub fn warning(&self, site: CallSite, values: &[&dyn Loggable]) -> String {
        self.log(Level::Warning, site, values)
    }

    #[inline]
    pub fn error(&self, site: CallSite, values: &[&dyn Loggable]) -> String {
        self.log(Level::Error, site, values)
    }

    /**
    Logs `values`, concatenated, at `level`.

    Returns the line with a trailing newline, or an empty string when the level is below the
    effective level (or is a threshold such as [Level::Off]).  I/O faults are absorbed: the
    line is still returned and mirrored.
    */
    pub fn log(&self, level: Level, site: CallSite, values: &[&dyn Loggable]) -> String {
        match self.emit(level, site, |record| push_values(record, values)) {
            Some(emitted) => {
                self.mirror(level, &emitted);
                self.absorb(emitted)
            }
            None => String::new(),
        }
    }

    /// Logs a `%` template; see [`format_template`].
    pub fn log_template(
        &self,
        level: Level,
        site: CallSite,
        template: &str,
        args: &[&dyn Loggable],
    ) -> String {
        match self.emit(level, site, |record| {
            record.log_owned(format_template(template, args))
        }) {
            Some(emitted) => {
                self.mirror(level, &emitted);
                self.absorb(emitted)
            }
            None => String::new(),
        }
    }

    /**
    Like [`Self::log`], but reports a failed file write instead of absorbing it.

    Filtered calls return `Ok` with an empty string.  The line is mirrored to the console and
    sinks either way.
    */
    pub fn try_log(
        &self,
        level: Level,
        site: CallSite,
        values: &[&dyn Loggable],
    ) -> Result<String, LogError> {
        let Some(emitted) = self.emit(level, site, |record| push_values(record, values)) else {
            return Ok(String::new());
        };
        self.mirror(level, &emitted);
        emitted.persisted?;
        Ok(emitted.line + "\n")
    }

    /**
    Like [`Self::log`], awaiting each sink's async hook.

    The file write itself is synchronous.
    */
    pub async fn log_async(&self, level: Level, site: CallSite, values: &[&dyn Loggable]) -> String {
        let Some(emitted) = self.emit(level, site, |record| push_values(record, values)) else {
            return String::new();
        };
        if emitted.mirror_console {
            self.console
                .write_line_async(level, emitted.line.clone())
                .await;
        }
        for sink in self.sinks() {
            sink.write_line_async(level, emitted.line.clone()).await;
        }
        self.absorb(emitted)
    }

    /// Flushes the console and every sink; call before the process exits.
    pub fn prepare_to_die(&self) {
        self.console.prepare_to_die();
        for sink in self.sinks() {
            sink.prepare_to_die();
        }
    }

    fn sinks(&self) -> Vec<Arc<dyn Sink>> {
        self.sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Level check, formatting and the file write.  `None` means filtered.
    fn emit(
        &self,
        level: Level,
        site: CallSite,
        fill: impl FnOnce(&mut LogRecord),
    ) -> Option<Emitted> {
        if level.label().is_none() {
            return None;
        }
        let config = self.config();
        if level < config.effective_level(self.build_mode) {
            return None;
        }
        let now = self.clock.now();
        let mut record = LogRecord::new(level, site, now);
        fill(&mut record);
        let line = format_line(&record, &config.display, &self.name);
        let persisted = self.file.try_append(level, &line, &config, now.date_naive());
        Some(Emitted {
            line,
            mirror_console: config.console && self.build_mode == BuildMode::Debug,
            persisted,
        })
    }

    fn mirror(&self, level: Level, emitted: &Emitted) {
        if emitted.mirror_console {
            self.console.write_line(level, &emitted.line);
        }
        for sink in self.sinks() {
            sink.write_line(level, &emitted.line);
        }
    }

    /// Drops a file fault, reporting it on stderr in debug builds.
    fn absorb(&self, emitted: Emitted) -> String {
        if let Err(e) = &emitted.persisted {
            if self.build_mode == BuildMode::Debug {
                let mut message = e.to_string();
                if let Some(source) = e.source() {
                    message.push_str(": ");
                    message.push_str(&source.to_string());
                }
                ConsoleSink::diagnostic(&message);
            }
        }
        emitted.line + "\n"
    }
}

fn push_values(record: &mut LogRecord, values: &[&dyn Loggable]) {
    for value in values {
        record.log_value(*value);
    }
}

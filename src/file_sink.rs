// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rotation file persistence.
//!
//! A [`FileSink`] owns one log directory and appends lines to the rotation file that
//! [`BucketPattern::file_name`] selects for each level and date.  Directories and files are
//! created on demand; existing content is never truncated.
//!
//! # Line layout
//!
//! Lines are newline-*separated*: the first line of a file is written as-is, and every later
//! line is prefixed with `\n`.  A file therefore never starts with a blank line and never
//! ends with a newline.
//!
//! # Thread safety
//!
//! Appends to the same path are serialized by a process-wide lock registry keyed by the
//! canonical file path, so concurrent writers from any thread, through any number of sinks or
//! loggers pointed at the same directory (however it is spelled), produce whole lines.  Other
//! processes are not coordinated with.  Registry entries no caller holds are evicted when the
//! registry grows and when their file is cleared.
//!
//! [`FileSink::clear_all_log_files`] deletes files out from under writers; callers must not
//! run it concurrently with logging to the same directory.
//!
//! # Failures
//!
//! Each operation comes in two flavours.  The plain one absorbs I/O faults (returning `None`,
//! `false` or an empty set) and never panics; the `try_` one reports a [`LogError`].  Nothing
//! is cached between calls, so once a fault clears the next call succeeds.

use crate::Level;
use crate::config::LoggerConfig;
use crate::error::LogError;
use crate::rotation::BucketPattern;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

type LockRegistry = Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

static FILE_LOCKS: OnceLock<LockRegistry> = OnceLock::new();

/// Registry size above which idle entries are pruned on the next lookup.
const PRUNE_THRESHOLD: usize = 64;

fn registry() -> std::sync::MutexGuard<'static, HashMap<PathBuf, Arc<Mutex<()>>>> {
    FILE_LOCKS
        .get_or_init(LockRegistry::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// `path` must be canonical (see [`FileSink::canonical_directory`]).
fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    let mut locks = registry();
    if locks.len() >= PRUNE_THRESHOLD {
        // entries only the registry holds have no waiters
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
    locks.entry(path.to_path_buf()).or_default().clone()
}

/// Drops the registry entry for `path` unless a caller still holds it.
fn release_path_lock(path: &Path) {
    let mut locks = registry();
    if locks.get(path).is_some_and(|lock| Arc::strong_count(lock) == 1) {
        locks.remove(path);
    }
}

/// Outcome of [`FileSink::try_append`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Appended {
    /// The level is below the persist threshold; nothing was touched.
    Filtered,
    /// The line was appended to this file.
    Written(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The log directory, whether or not it exists yet.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The log directory, created recursively if absent.
    pub fn try_log_directory(&self) -> Result<&Path, LogError> {
        if !self.directory.is_dir() {
            fs::create_dir_all(&self.directory).map_err(|source| LogError::CreateDirectory {
                path: self.directory.clone(),
                source,
            })?;
        }
        Ok(&self.directory)
    }

    /// The log directory, created if absent, with symlinks and `..` resolved.
    fn canonical_directory(&self) -> Result<PathBuf, LogError> {
        let directory = self.try_log_directory()?;
        fs::canonicalize(directory).map_err(|source| LogError::ReadDirectory {
            path: directory.to_path_buf(),
            source,
        })
    }

    /// Like [`Self::try_log_directory`], returning the path even if creation failed.
    pub fn log_directory(&self) -> &Path {
        let _ = self.try_log_directory();
        &self.directory
    }

    /**
    The rotation file for `level` on `date`, creating the directory and an empty file if
    needed.

    Idempotent: calling it again within the same bucket returns the same path and leaves the
    file's content untouched.  The returned path is canonical, so every spelling of the same
    directory resolves to the same file path.
    */
    pub fn try_resolve_writable_path(
        &self,
        level: Level,
        pattern: &BucketPattern,
        date: NaiveDate,
    ) -> Result<PathBuf, LogError> {
        let name = pattern
            .file_name(level, date)
            .ok_or(LogError::NotPersistable(level))?;
        let path = self.canonical_directory()?.join(name);
        open_append(&path, true).map_err(|source| LogError::CreateFile {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn resolve_writable_path(
        &self,
        level: Level,
        pattern: &BucketPattern,
        date: NaiveDate,
    ) -> Option<PathBuf> {
        self.try_resolve_writable_path(level, pattern, date).ok()
    }

    /**
    Appends `line` to the rotation file for `level`.

    Levels below `config.save_file_level` are filtered without touching the disk.
    */
    pub fn try_append(
        &self,
        level: Level,
        line: &str,
        config: &LoggerConfig,
        date: NaiveDate,
    ) -> Result<Appended, LogError> {
        if level < config.save_file_level {
            return Ok(Appended::Filtered);
        }
        let path = self.try_resolve_writable_path(level, &config.file_pattern, date)?;

        let lock = path_lock(&path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut file = match open_append(&path, false) {
            Ok(file) => file,
            // removed since it was resolved; start it over with this line
            Err(e) if e.kind() == ErrorKind::NotFound => {
                open_append(&path, true).map_err(|source| LogError::CreateFile {
                    path: path.clone(),
                    source,
                })?
            }
            Err(source) => {
                return Err(LogError::OpenFile {
                    path: path.clone(),
                    source,
                });
            }
        };
        write_entry(&mut file, line).map_err(|source| LogError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(Appended::Written(path))
    }

    /// Like [`Self::try_append`]; `true` only if the line reached the disk.
    pub fn append(&self, level: Level, line: &str, config: &LoggerConfig, date: NaiveDate) -> bool {
        matches!(
            self.try_append(level, line, config, date),
            Ok(Appended::Written(_))
        )
    }

    /// Names of the regular files in the log directory.
    pub fn try_list_log_files(&self) -> Result<BTreeSet<String>, LogError> {
        let directory = self.try_log_directory()?;
        let entries = fs::read_dir(directory).map_err(|source| LogError::ReadDirectory {
            path: directory.to_path_buf(),
            source,
        })?;
        Ok(entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect())
    }

    pub fn list_log_files(&self) -> BTreeSet<String> {
        self.try_list_log_files().unwrap_or_default()
    }

    /**
    Deletes every file in the log directory, returning how many were removed.

    Stops at the first file that cannot be removed.
    */
    pub fn try_clear_all_log_files(&self) -> Result<usize, LogError> {
        let names = self.try_list_log_files()?;
        let directory = self.canonical_directory()?;
        for name in &names {
            remove_locked(&directory.join(name))
                .map_err(|(path, source)| LogError::RemoveFile { path, source })?;
        }
        Ok(names.len())
    }

    /**
    Deletes every file in the log directory, best-effort.

    Returns `true` iff no file is left afterwards.  Not safe to run while other threads log
    to this directory.
    */
    pub fn clear_all_log_files(&self) -> bool {
        if let Ok(directory) = self.canonical_directory() {
            for name in self.list_log_files() {
                let _ = remove_locked(&directory.join(name));
            }
        }
        self.try_list_log_files()
            .map(|names| names.is_empty())
            .unwrap_or(false)
    }
}

/// Removes `path` under its lock, then evicts the lock.
fn remove_locked(path: &Path) -> Result<(), (PathBuf, std::io::Error)> {
    let lock = path_lock(path);
    let removed = {
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        fs::remove_file(path)
    };
    drop(lock);
    release_path_lock(path);
    removed.map_err(|source| (path.to_path_buf(), source))
}

fn open_append(path: &Path, create: bool) -> std::io::Result<File> {
    OpenOptions::new().append(true).create(create).open(path)
}

fn write_entry(file: &mut File, line: &str) -> std::io::Result<()> {
    let has_content = file.metadata()?.len() > 0;
    let mut bytes = Vec::with_capacity(line.len() + 1);
    if has_content {
        bytes.push(b'\n');
    }
    bytes.extend_from_slice(line.as_bytes());
    file.write_all(&bytes)?;
    file.flush()
}

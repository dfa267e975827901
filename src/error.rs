// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.
//!
//! The plain logging entry points never fail: they absorb I/O faults and degrade to a
//! missing line.  The `try_` entry points surface the same faults as [`LogError`].

use crate::Level;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    /// returned if the log directory could not be created
    #[error("could not create the log directory {}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// returned if a rotation file could not be created
    #[error("could not create the log file {}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// returned if an existing rotation file could not be opened for appending
    #[error("could not open the log file {}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// returned if a line could not be written to a rotation file
    #[error("could not write to the log file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// returned if the log directory could not be listed
    #[error("could not read the log directory {}", path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// returned if a log file could not be deleted
    #[error("could not remove the log file {}", path.display())]
    RemoveFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// returned when asked for the file of a threshold level such as `All` or `Off`
    #[error("the level `{0}` is a threshold and has no log file")]
    NotPersistable(Level),
}

/// Errors from parsing configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown log level `{0}`")]
    Level(String),
    #[error("unknown build mode `{0}`, expected `debug` or `release`")]
    BuildMode(String),
}

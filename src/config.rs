// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logger configuration.
//!
//! [`LoggerConfig`] holds everything a [`Logger`](crate::Logger) reads on each call.  It can be
//! replaced or edited at any time; every call works from a snapshot taken at its start.
//!
//! [`BuildMode`] picks which minimum level applies.  It is resolved once per process by
//! [`BuildMode::current`] and captured by each logger at construction.

use crate::Level;
use crate::error::ParseError;
use crate::rotation::BucketPattern;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable overriding the detected build mode (`debug` or `release`).
pub const BUILD_MODE_ENV: &str = "XTILOGER_BUILD_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildMode {
    /// Development builds: `debug_level` applies and lines are mirrored to the console.
    Debug,
    /// Shipped builds: `release_level` applies and nothing is printed.
    Release,
}

static CURRENT_BUILD_MODE: OnceLock<BuildMode> = OnceLock::new();

impl BuildMode {
    /// The mode the crate was compiled in, from `debug_assertions`.
    pub const fn compiled() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Debug
        } else {
            BuildMode::Release
        }
    }

    /**
    The build mode of this process.

    Resolved on first use: [BUILD_MODE_ENV] wins when it holds a valid mode, otherwise
    [BuildMode::compiled].  The value never changes afterwards.
    */
    pub fn current() -> Self {
        *CURRENT_BUILD_MODE.get_or_init(|| {
            std::env::var(BUILD_MODE_ENV)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(Self::compiled)
        })
    }
}

impl Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Debug => f.write_str("debug"),
            BuildMode::Release => f.write_str("release"),
        }
    }
}

impl FromStr for BuildMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "debug" | "dev" => Ok(BuildMode::Debug),
            "release" => Ok(BuildMode::Release),
            _ => Err(ParseError::BuildMode(trimmed.to_string())),
        }
    }
}

/// Which metadata segments a formatted line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayOptions {
    /// Print a timestamp at all.
    pub show_time: bool,
    /// `yyyy-MM-dd HH:mm:ss.SSS` when set, `HH:mm:ss.SSS` otherwise.
    pub show_long_time: bool,
    pub show_level: bool,
    pub show_thread: bool,
    pub show_file_name: bool,
    pub show_line_number: bool,
    pub show_function_name: bool,
}

impl DisplayOptions {
    /// Every segment off: lines are the bare message.
    pub const fn none() -> Self {
        Self {
            show_time: false,
            show_long_time: false,
            show_level: false,
            show_thread: false,
            show_file_name: false,
            show_line_number: false,
            show_function_name: false,
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_time: true,
            show_long_time: true,
            show_level: true,
            show_thread: true,
            show_file_name: true,
            show_line_number: true,
            show_function_name: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Minimum level in [BuildMode::Debug].
    pub debug_level: Level,
    /// Minimum level in [BuildMode::Release].
    pub release_level: Level,
    /// Minimum level written to the rotation files.
    pub save_file_level: Level,
    pub file_pattern: BucketPattern,
    pub display: DisplayOptions,
    /// Mirror lines to stdout.  Only honored in [BuildMode::Debug].
    pub console: bool,
}

impl LoggerConfig {
    pub fn effective_level(&self, mode: BuildMode) -> Level {
        match mode {
            BuildMode::Debug => self.debug_level,
            BuildMode::Release => self.release_level,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            debug_level: Level::All,
            release_level: Level::Warning,
            save_file_level: Level::Warning,
            file_pattern: BucketPattern::default(),
            display: DisplayOptions::default(),
            console: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.effective_level(BuildMode::Debug), Level::All);
        assert_eq!(config.effective_level(BuildMode::Release), Level::Warning);
        assert_eq!(config.save_file_level, Level::Warning);
        assert_eq!(config.file_pattern.as_str(), "Y-WY");
        assert!(config.display.show_function_name && config.display.show_long_time);
    }

    #[test]
    fn build_mode_parsing() {
        assert_eq!("Release".parse::<BuildMode>().unwrap(), BuildMode::Release);
        assert_eq!(" debug".parse::<BuildMode>().unwrap(), BuildMode::Debug);
        assert_eq!(
            " Staging ".parse::<BuildMode>().unwrap_err(),
            ParseError::BuildMode("Staging".to_string())
        );
    }

    #[test]
    fn current_build_mode_is_stable() {
        assert_eq!(BuildMode::current(), BuildMode::current());
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::ParseError;
use std::fmt::Display;
use std::str::FromStr;

/**
Severity of a log message.

Levels are ordered by declaration: [Level::All] is the most permissive threshold and
[Level::Off] suppresses everything.  Note that [Level::Info] ranks *below* [Level::Debug].

```
use xtiloger::Level;
assert!(Level::Info < Level::Debug);
assert!(Level::Error >= Level::Warning);
assert!(Level::All < Level::Info && Level::Error < Level::Off);
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Threshold only: lets every message through
    #[default]
    All,
    Info,
    Debug,
    Warning,
    Error,
    /// Threshold only: suppresses every message
    Off,
}

impl Level {
    /// Every level, in rank order.
    pub const ALL_LEVELS: [Level; 6] = [
        Level::All,
        Level::Info,
        Level::Debug,
        Level::Warning,
        Level::Error,
        Level::Off,
    ];

    /**
    The label used in rotation file names.

    Thresholds ([Level::All] and [Level::Off]) never name a file, so they return `None`.
    */
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Level::Info => Some("info"),
            Level::Debug => Some("debug"),
            Level::Warning => Some("warning"),
            Level::Error => Some("error"),
            Level::All | Level::Off => None,
        }
    }

    /// The bracketed tag written into formatted lines, e.g. `[WARNING]`.
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Level::Info => Some("[INFO]"),
            Level::Debug => Some("[DEBUG]"),
            Level::Warning => Some("[WARNING]"),
            Level::Error => Some("[ERROR]"),
            Level::All | Level::Off => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Level::All => "all",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "all" => Ok(Level::All),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(ParseError::Level(trimmed.to_string())),
        }
    }
}

/*
Boilerplate notes.

Copy: a fieldless enum, copying is free.
Ord: the whole point of the type.
Default: All, matching the debug-mode threshold.
Display: the lowercase name, which round-trips through FromStr.
From/Into integers: not provided, the rank is not part of the API.
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_declaration() {
        for pair in Level::ALL_LEVELS.windows(2) {
            assert!(pair[0] < pair[1], "{} should rank below {}", pair[0], pair[1]);
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn thresholds_have_no_label() {
        assert_eq!(Level::All.label(), None);
        assert_eq!(Level::Off.label(), None);
        assert_eq!(Level::Warning.label(), Some("warning"));
        assert_eq!(Level::Error.tag(), Some("[ERROR]"));
    }

    #[test]
    fn parse_round_trips_display() {
        for level in Level::ALL_LEVELS {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
        assert_eq!(" WARN ".parse::<Level>().unwrap(), Level::Warning);
        assert!("verbose".parse::<Level>().is_err());
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rotation file naming.
//!
//! A [`BucketPattern`] is a dash-separated list of calendar tokens: `Y` (year), `M` (month),
//! `D` (day of month) and `WY` (ISO week of year).  The tokens that are present key the
//! rotation: `"Y-WY"` starts a new file every week, `"Y-M"` every month, `"Y-M-D"` every day.
//!
//! ```
//! use chrono::NaiveDate;
//! use xtiloger::{BucketPattern, Level};
//!
//! let pattern: BucketPattern = "Y-M".parse().unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
//! assert_eq!(pattern.file_name(Level::Error, date).unwrap(), "error-2024-12.log");
//! ```
//!
//! Unrecognized tokens are skipped without error, so patterns written for a newer release
//! still produce a usable name.
//!
//! When the pattern keys on `WY` without `M` or `D`, `Y` is the ISO week-numbering year.
//! This keeps a week that straddles New Year in a single file: 2024-12-30 and 2025-01-05
//! both land in `<label>-2025-1.log`.

use crate::Level;
use chrono::{Datelike, NaiveDate};
use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_PATTERN: &str = "Y-WY";
const EXTENSION: &str = ".log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketToken {
    Year,
    Month,
    Day,
    WeekOfYear,
}

impl BucketToken {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Y" => Some(BucketToken::Year),
            "M" => Some(BucketToken::Month),
            "D" => Some(BucketToken::Day),
            "WY" => Some(BucketToken::WeekOfYear),
            _ => None,
        }
    }
}

/// A parsed rotation pattern, e.g. `"Y-WY"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketPattern {
    source: String,
    tokens: Vec<BucketToken>,
}

impl BucketPattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            source: pattern.to_string(),
            tokens: pattern.split('-').filter_map(BucketToken::parse).collect(),
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The recognized tokens, in pattern order.
    pub fn tokens(&self) -> &[BucketToken] {
        &self.tokens
    }

    fn keys_on_iso_week(&self) -> bool {
        self.tokens.contains(&BucketToken::WeekOfYear)
            && !self
                .tokens
                .iter()
                .any(|t| matches!(t, BucketToken::Month | BucketToken::Day))
    }

    /// The numeric value of each token for `date`, in pattern order.
    pub fn bucket_values(&self, date: NaiveDate) -> Vec<i64> {
        let iso = date.iso_week();
        let year = if self.keys_on_iso_week() {
            iso.year()
        } else {
            date.year()
        };
        self.tokens
            .iter()
            .map(|token| match token {
                BucketToken::Year => i64::from(year),
                BucketToken::Month => i64::from(date.month()),
                BucketToken::Day => i64::from(date.day()),
                BucketToken::WeekOfYear => i64::from(iso.week()),
            })
            .collect()
    }

    /**
    Derives the rotation file name for `level` on `date`.

    Returns `None` for threshold levels ([Level::All], [Level::Off]), which are never
    written to disk.
    */
    pub fn file_name(&self, level: Level, date: NaiveDate) -> Option<String> {
        let label = level.label()?;
        let mut name = String::from(label);
        for value in self.bucket_values(date) {
            name.push('-');
            name.push_str(&value.to_string());
        }
        name.push_str(EXTENSION);
        Some(name)
    }
}

impl Default for BucketPattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl FromStr for BucketPattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for BucketPattern {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Display for BucketPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_pattern() {
        let pattern = BucketPattern::new("Y-M");
        assert_eq!(
            pattern.file_name(Level::Error, date(2024, 12, 5)).unwrap(),
            "error-2024-12.log"
        );
        assert_eq!(
            pattern.file_name(Level::Warning, date(2018, 3, 21)).unwrap(),
            "warning-2018-3.log"
        );
    }

    #[test]
    fn day_pattern_is_unpadded() {
        let pattern = BucketPattern::new("Y-M-D");
        assert_eq!(
            pattern.file_name(Level::Debug, date(2018, 3, 1)).unwrap(),
            "debug-2018-3-1.log"
        );
    }

    #[test]
    fn same_week_same_file() {
        let pattern = BucketPattern::default();
        let monday = pattern.file_name(Level::Error, date(2024, 12, 16)).unwrap();
        let sunday = pattern.file_name(Level::Error, date(2024, 12, 22)).unwrap();
        let next_monday = pattern.file_name(Level::Error, date(2024, 12, 23)).unwrap();
        assert_eq!(monday, "error-2024-51.log");
        assert_eq!(monday, sunday);
        assert_ne!(monday, next_monday);
    }

    #[test]
    fn week_spanning_new_year_stays_in_one_file() {
        let pattern = BucketPattern::default();
        let before = pattern.file_name(Level::Info, date(2024, 12, 30)).unwrap();
        let after = pattern.file_name(Level::Info, date(2025, 1, 5)).unwrap();
        assert_eq!(before, "info-2025-1.log");
        assert_eq!(before, after);
        // first week of 2024 must not collide with it
        assert_eq!(
            pattern.file_name(Level::Info, date(2024, 1, 3)).unwrap(),
            "info-2024-1.log"
        );
    }

    #[test]
    fn unknown_tokens_are_skipped() {
        let pattern = BucketPattern::new("Y-Q--M-hour");
        assert_eq!(pattern.tokens(), &[BucketToken::Year, BucketToken::Month]);
        assert_eq!(
            pattern.file_name(Level::Info, date(2024, 2, 29)).unwrap(),
            "info-2024-2.log"
        );
        assert_eq!(
            BucketPattern::new("").file_name(Level::Info, date(2024, 2, 29)).unwrap(),
            "info.log"
        );
        assert_eq!(BucketPattern::new("Y-Q").to_string(), "Y-Q");
    }

    #[test]
    fn thresholds_name_no_file() {
        let pattern = BucketPattern::default();
        assert_eq!(pattern.file_name(Level::All, date(2024, 1, 1)), None);
        assert_eq!(pattern.file_name(Level::Off, date(2024, 1, 1)), None);
    }
}

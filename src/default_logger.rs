// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide default logger.
//!
//! The leveled macros invoked without an explicit logger (`info!("...")`) write through the
//! default logger.  It is an ordinary [`Logger`] held in one place:
//!
//! # Lifecycle
//!
//! 1. Nothing exists until the default logger is first requested.
//! 2. If [`set_default_logger`] was called before that, the installed logger is used.
//!    Otherwise the first call to [`default_logger`] builds `Logger::new("default")`, which
//!    writes under `<documents>/XTILoger/default/`.
//! 3. [`set_default_logger`] may replace it at any time.  Calls already holding the previous
//!    `Arc` finish against it; the previous logger is dropped with its last reference.
//!
//! Configure the default logger early, typically while the application starts.
//!
//! ```
//! use xtiloger::{Logger, default_logger, set_default_logger};
//! use std::sync::Arc;
//!
//! # let dir = tempfile::tempdir().unwrap();
//! let app = Arc::new(Logger::with_root(dir.path(), "app"));
//! let previous = set_default_logger(app.clone());
//! assert!(Arc::ptr_eq(&default_logger(), &app));
//!
//! // put things back for the rest of the process
//! set_default_logger(previous);
//! ```

use crate::logger::Logger;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Name of the logger built when none was installed.
pub const DEFAULT_LOGGER_NAME: &str = "default";

static DEFAULT_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(Arc::new(Logger::new(DEFAULT_LOGGER_NAME))))
}

/// The current default logger, built on first use.
pub fn default_logger() -> Arc<Logger> {
    slot().read().unwrap_or_else(PoisonError::into_inner).clone()
}

/**
Installs `logger` as the default logger, returning the one it replaces.

When no default logger existed yet, the stock logger is never built and `logger` itself is
returned.
*/
pub fn set_default_logger(logger: Arc<Logger>) -> Arc<Logger> {
    let slot = DEFAULT_LOGGER.get_or_init(|| RwLock::new(logger.clone()));
    let mut current = slot.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *current, logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;

    static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn set_returns_previous() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let first = Arc::new(Logger::with_root(dir.path(), "first"));
        let second = Arc::new(Logger::with_root(dir.path(), "second"));

        let original = set_default_logger(first.clone());
        let replaced = set_default_logger(second.clone());
        assert!(Arc::ptr_eq(&replaced, &first));
        assert_eq!(default_logger().name(), "second");

        set_default_logger(original);
    }

    #[test]
    fn replacement_is_visible_across_threads() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let logger = Arc::new(Logger::with_root(dir.path(), "threaded"));
        let original = set_default_logger(logger.clone());

        let seen = thread::spawn(|| default_logger().name().to_string())
            .join()
            .expect("Thread should complete successfully");
        assert_eq!(seen, "threaded");

        set_default_logger(original);
    }
}

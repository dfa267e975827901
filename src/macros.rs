// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging macros.
//!
//! Each leveled macro captures the call site (`file!()`, `line!()` and the enclosing
//! function's name) and forwards to the matching [`Logger`](crate::Logger) method.  Two forms
//! are accepted:
//!
//! ```rust
//! # let dir = tempfile::tempdir().unwrap();
//! use xtiloger::{Logger, info, warning};
//!
//! let logger = Logger::with_root(dir.path(), "app");
//! let retries = 3;
//!
//! // an explicit logger, then the message values
//! let line = warning!(logger => "retrying ", retries, " times");
//! assert!(line.ends_with("=> retrying 3 times\n"));
//!
//! // no logger: the process-wide default logger
//! let _ = info!("using the default logger");
//! ```
//!
//! Values are concatenated with no separator; each must implement
//! [`Loggable`](crate::Loggable).  Every macro evaluates to the formatted line, which is empty
//! when the call was filtered.

/**
The name of the enclosing function, as a `&'static str`.

Closures report the function they are defined in.

```
fn connect() -> &'static str {
    xtiloger::function_name!()
}
assert_eq!(connect(), "connect");
```
*/
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __xtiloger_probe() {}
        fn __xtiloger_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::hidden::innermost_function(__xtiloger_type_name_of(__xtiloger_probe))
    }};
}

/// The [`CallSite`](crate::CallSite) of the invocation.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(::std::file!(), ::std::line!(), $crate::function_name!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $logger:expr, [$($value:expr),*]) => {
        $crate::Logger::log(
            &$logger,
            $level,
            $crate::call_site!(),
            &[$(&$value as &dyn $crate::Loggable),*],
        )
    };
}

/// Logs at [`Level::Info`](crate::Level::Info).  See the [module docs](crate::macros).
#[macro_export]
macro_rules! info {
    () => {
        $crate::__log_at!($crate::Level::Info, $crate::default_logger(), [])
    };
    ($logger:expr => $($value:expr),* $(,)?) => {
        $crate::__log_at!($crate::Level::Info, $logger, [$($value),*])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__log_at!($crate::Level::Info, $crate::default_logger(), [$($value),+])
    };
}

/// Logs at [`Level::Debug`](crate::Level::Debug).  See the [module docs](crate::macros).
#[macro_export]
macro_rules! debug {
    () => {
        $crate::__log_at!($crate::Level::Debug, $crate::default_logger(), [])
    };
    ($logger:expr => $($value:expr),* $(,)?) => {
        $crate::__log_at!($crate::Level::Debug, $logger, [$($value),*])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__log_at!($crate::Level::Debug, $crate::default_logger(), [$($value),+])
    };
}

/// Logs at [`Level::Warning`](crate::Level::Warning).  See the [module docs](crate::macros).
#[macro_export]
macro_rules! warning {
    () => {
        $crate::__log_at!($crate::Level::Warning, $crate::default_logger(), [])
    };
    ($logger:expr => $($value:expr),* $(,)?) => {
        $crate::__log_at!($crate::Level::Warning, $logger, [$($value),*])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__log_at!($crate::Level::Warning, $crate::default_logger(), [$($value),+])
    };
}

/// Logs at [`Level::Error`](crate::Level::Error).  See the [module docs](crate::macros).
#[macro_export]
macro_rules! error {
    () => {
        $crate::__log_at!($crate::Level::Error, $crate::default_logger(), [])
    };
    ($logger:expr => $($value:expr),* $(,)?) => {
        $crate::__log_at!($crate::Level::Error, $logger, [$($value),*])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__log_at!($crate::Level::Error, $crate::default_logger(), [$($value),+])
    };
}

/**
Logs a `%` template at the given level.

See [`format_template`](crate::formatter::format_template) for the marker syntax.

```rust
# let dir = tempfile::tempdir().unwrap();
use xtiloger::{Level, Logger, log_template};

let logger = Logger::with_root(dir.path(), "app");
let line = log_template!(logger => Level::Error, "%d of %d shards offline", 2, 16);
assert!(line.ends_with("=> 2 of 16 shards offline\n"));
```
*/
#[macro_export]
macro_rules! log_template {
    ($logger:expr => $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::log_template(
            &$logger,
            $level,
            $crate::call_site!(),
            $template,
            &[$(&$arg as &dyn $crate::Loggable),*],
        )
    };
    ($level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_template!($crate::default_logger() => $level, $template $(, $arg)*)
    };
}

/// Reduces a `type_name` path of a probe function to its enclosing function's name.
#[doc(hidden)]
pub fn innermost_function(probe_path: &'static str) -> &'static str {
    let path = probe_path
        .strip_suffix("::__xtiloger_probe")
        .unwrap_or(probe_path);
    path.rsplit("::")
        .find(|segment| !segment.is_empty() && *segment != "{{closure}}")
        .unwrap_or(path)
}

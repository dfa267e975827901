//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# xtiloger

xtiloger is a leveled logging library that keeps its logs in plain text files, rotated by
calendar bucket.

# The problem

Client applications want two things from logging: chatty output on the developer's console
while they work, and a small, durable trail of what went wrong on the user's machine.  The
second one has to survive restarts and be easy to collect ("send us the files in this
folder"), without growing forever in a single file.

# The pipeline

Every call goes through the same steps:

1. **Filter**: the call's [Level] is compared with the logger's *effective level*, which is
   `debug_level` in [BuildMode::Debug] and `release_level` in [BuildMode::Release].  Filtered
   calls return an empty string and do nothing else.
2. **Format**: the message values are reduced to text and prefixed with metadata
   (timestamp, level, `[file:line]`, thread, function), each part switchable in
   [DisplayOptions].
3. **Persist**: if the level is at least `save_file_level`, the line is appended to the
   rotation file for that level, e.g. `warning-2024-51.log` for the pattern `"Y-WY"`.
4. **Mirror**: in debug builds the line is echoed to stdout, and any added [Sink] receives it.
5. **Return**: the line, with a trailing newline, is handed back to the caller.

| Level     | Default in debug builds | Default in release builds | Persisted by default |
|-----------|-------------------------|---------------------------|----------------------|
| `info`    | yes                     | no                        | no                   |
| `debug`   | yes                     | no                        | no                   |
| `warning` | yes                     | yes                       | yes                  |
| `error`   | yes                     | yes                       | yes                  |

# Files on disk

Each logger owns `<documents>/XTILoger/<name>/`.  Inside, there is one file per level and
bucket: the bucket pattern is a dash-separated list of `Y`, `M`, `D` and `WY` (ISO week),
so `"Y-M"` keeps a file per month and `"Y-M-D"` a file per day.  Files are created on
first write and only removed by [Logger::clear_all_log_files].

# The API

```rust
# let dir = tempfile::tempdir().unwrap();
use xtiloger::{Level, Logger, error, info};

let logger = Logger::with_root(dir.path(), "sync");
logger.update_config(|config| config.save_file_level = Level::Error);

info!(logger => "synced ", 12, " items");
let line = error!(logger => "upload failed: ", "timeout");
assert!(line.contains("[sync] [ERROR]"));
assert_eq!(logger.list_log_files().len(), 1);
```

Without an explicit logger, the macros use the process-wide [default_logger].

# Failures

Logging never panics and never returns an error from the leveled calls: a failed write only
costs the line on disk.  [Logger::try_log] and the `try_` methods of [FileSink] report the
underlying [LogError] for callers that care.

# Multithreading

Loggers are `Send + Sync`.  Appends to the same file are serialized process-wide, so lines
from concurrent threads never interleave.  Clearing the log files while other threads log to
the same directory is the caller's responsibility to avoid.
*/

mod level;
mod error;
pub mod loggable;
mod log_record;
pub mod formatter;
pub mod rotation;
pub mod clock;
pub mod config;
mod sink;
mod console_sink;
mod inmemory_sink;
mod file_sink;
mod logger;
mod default_logger;
pub mod macros;

pub use level::Level;
pub use error::{LogError, ParseError};
pub use loggable::{LogBuilder, Loggable, LogDebug, LogDisplay};
pub use log_record::{CallSite, LogRecord, ThreadMarker};
pub use rotation::{BucketPattern, BucketToken};
pub use config::{BuildMode, DisplayOptions, LoggerConfig};
pub use sink::Sink;
pub use console_sink::ConsoleSink;
pub use inmemory_sink::InMemorySink;
pub use file_sink::{Appended, FileSink};
pub use logger::{Logger, ROOT_DIRECTORY, default_root};
pub use default_logger::{DEFAULT_LOGGER_NAME, default_logger, set_default_logger};

#[doc(hidden)]
pub mod hidden {
    pub use crate::macros::innermost_function;
}

// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use xtiloger::{BuildMode, DisplayOptions, Level, Logger, LoggerConfig, error};

const THREADS: usize = 6;
const LINES: usize = 40;

#[test]
fn concurrent_loggers_never_interleave_lines() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggerConfig {
        console: false,
        display: DisplayOptions::none(),
        file_pattern: "Y".parse().unwrap(),
        ..LoggerConfig::default()
    };

    // two loggers sharing one directory contend on the same files
    let loggers: Vec<Arc<Logger>> = (0..2)
        .map(|_| {
            Arc::new(
                Logger::with_root(dir.path(), "shared")
                    .with_build_mode(BuildMode::Debug)
                    .with_config(config.clone()),
            )
        })
        .collect();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = loggers[t % loggers.len()].clone();
            thread::spawn(move || {
                for i in 0..LINES {
                    let _ = error!(logger => "thread ", t, " line ", i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread should complete successfully");
    }

    let path = loggers[0].current_log_file_path(Level::Error).unwrap();
    let contents = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), THREADS * LINES);

    let unique: HashSet<&str> = lines.iter().copied().collect();
    assert_eq!(unique.len(), THREADS * LINES);
    for line in lines {
        assert!(line.starts_with("thread "), "mangled line {line:?}");
    }
}

#[test]
fn cleared_directory_is_recreated_on_next_write() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Logger::with_root(dir.path(), "cleared")
        .with_build_mode(BuildMode::Debug)
        .with_config(LoggerConfig {
            console: false,
            ..LoggerConfig::default()
        });

    let _ = error!(logger => "before");
    assert!(logger.clear_all_log_files());
    assert!(logger.list_log_files().is_empty());

    std::fs::remove_dir_all(dir.path().join("cleared")).unwrap();
    let _ = error!(logger => "after");
    assert_eq!(logger.list_log_files().len(), 1);
}

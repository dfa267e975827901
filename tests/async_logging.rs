// SPDX-License-Identifier: MIT OR Apache-2.0

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use test_executors::async_test;
    use xtiloger::{BuildMode, InMemorySink, Level, Logger, LoggerConfig, call_site};

    fn logger(root: &std::path::Path) -> (Logger, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        let logger = Logger::with_root(root, "async")
            .with_build_mode(BuildMode::Release)
            .with_config(LoggerConfig {
                console: false,
                ..LoggerConfig::default()
            });
        logger.add_sink(sink.clone());
        (logger, sink)
    }

    #[async_test]
    async fn log_async_reaches_sinks_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, sink) = logger(dir.path());

        let line = logger
            .log_async(Level::Error, call_site!(), &[&"request ", &7u64, &" failed"])
            .await;
        assert!(line.ends_with("=> request 7 failed\n"));

        let lines = sink.drain();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::Error);
        assert_eq!(format!("{}\n", lines[0].1), line);
        assert_eq!(logger.list_log_files().len(), 1);
    }

    #[async_test]
    async fn log_async_respects_the_effective_level() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, sink) = logger(dir.path());

        let line = logger.log_async(Level::Debug, call_site!(), &[&"quiet"]).await;
        assert_eq!(line, "");
        assert!(sink.is_empty());
        assert!(logger.list_log_files().is_empty());
    }
}

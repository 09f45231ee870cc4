//! Tracing subscriber setup.
//!
//! Logs go to stdout by default; setting `LoggingConfig.file` redirects
//! them to an append-mode log file instead (without ANSI escapes).

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let writer = make_writer(config);

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(config.file.is_none())
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

fn make_writer(config: &LoggingConfig) -> BoxMakeWriter {
    match config.file.as_deref().map(open_log_file) {
        Some(Ok(file)) => BoxMakeWriter::new(Mutex::new(file)),
        Some(Err(e)) => {
            // Tracing is not up yet, so this cannot be a tracing call.
            eprintln!("Failed to open log file, falling back to stdout: {e}");
            BoxMakeWriter::new(std::io::stdout)
        }
        None => BoxMakeWriter::new(std::io::stdout),
    }
}

/// Open a log file in append mode, creating parent directories.
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_is_created_and_appended() {
        let dir = std::env::temp_dir().join("handwave_test_logging");
        let _ = std::fs::remove_dir_all(&dir);

        let path = dir.join("nested").join("handwave.log");
        {
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "first").unwrap();
        }
        {
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "second").unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_logging_creates_the_configured_file() {
        // set_global_default may lose the race against other tests, so
        // only the file side effect is asserted here.
        let dir = std::env::temp_dir().join("handwave_test_logging_init");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("handwave.log");

        init_logging(&LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(path.clone()),
        });

        assert!(path.exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}

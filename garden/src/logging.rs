//! File logging for the TUI.
//!
//! The terminal is in raw mode on the alternate screen while the app runs,
//! so every log line goes to `<data_dir>/logs/garden.log` instead.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "garden=info,garden_core=info";

/// Log file name inside `<data_dir>/logs`.
pub const LOG_FILE: &str = "garden.log";

/// Create the non-blocking log writer.
///
/// The returned guard flushes pending lines when dropped and must be kept
/// alive until the app exits.
pub fn create_log_writer(data_dir: &Path) -> io::Result<(NonBlocking, WorkerGuard)> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    Ok(tracing_appender::non_blocking(file_appender))
}

/// Install the global subscriber writing to the garden log.
pub fn init(data_dir: &Path) -> io::Result<WorkerGuard> {
    let (writer, guard) = create_log_writer(data_dir)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init()
        .ok();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_log_writer_creates_logs_dir() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let data_dir = tmp.path().join("nested").join("garden");

        let (writer, _guard) = create_log_writer(&data_dir).expect("Should create log writer");

        let log_dir = data_dir.join("logs");
        assert!(log_dir.is_dir(), "logs/ should be a directory");
        assert!(log_dir.join(LOG_FILE).exists(), "log file should be created");
        drop(writer);
    }

    #[test]
    fn test_create_log_writer_error_on_invalid_path() {
        let result = create_log_writer(Path::new("/dev/null/impossible"));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}

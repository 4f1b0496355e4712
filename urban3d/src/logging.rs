//! Logging infrastructure for urban3d.
//!
//! Provides structured logging with file output and optional console output:
//! - Writes to the configured log file (cleared on session start)
//! - Optionally mirrors to stdout for interactive runs
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging system.
///
/// Creates the log directory if needed, clears the previous log file, and
/// installs a global subscriber writing to the file and, when
/// `stdout_enabled`, to stdout.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files (e.g., "~/.urban3d")
/// * `log_file` - Log filename (e.g., "urban3d.log")
/// * `stdout_enabled` - Mirror events to stdout
/// * `verbose` - Default to debug level for this crate when RUST_LOG is unset
///
/// # Errors
///
/// Returns error if log directory cannot be created or log file cannot be cleared
pub fn init_logging(
    log_dir: &Path,
    log_file: &str,
    stdout_enabled: bool,
    verbose: bool,
) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = stdout_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .with_target(false)
    });

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter_directive(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Filter used when RUST_LOG is not set.
pub fn default_filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,urban3d=debug,urban3d_cli=debug"
    } else {
        "info"
    }
}

/// Creates `log_dir` and truncates `log_file` inside it.
pub fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}

/// Splits a configured log path into directory and file name.
///
/// A bare file name logs into the current directory.
pub fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "urban3d.log".to_string());
    (dir, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let log_dir = temp.path().join("deep").join("nested");

        let path = prepare_log_file(&log_dir, "test.log").unwrap();

        assert_eq!(path, log_dir.join("test.log"));
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_prepare_clears_existing_file() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("test.log");
        fs::write(&log_path, "old log data").unwrap();

        prepare_log_file(temp.path(), "test.log").unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_prepare_fails_when_directory_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        assert!(prepare_log_file(&blocker.join("logs"), "x.log").is_err());
    }

    #[test]
    fn test_split_log_path() {
        assert_eq!(
            split_log_path(Path::new("/var/log/urban3d/run.log")),
            (PathBuf::from("/var/log/urban3d"), "run.log".to_string())
        );
        assert_eq!(
            split_log_path(Path::new("run.log")),
            (PathBuf::from("."), "run.log".to_string())
        );
    }

    #[test]
    fn test_default_filter_directive() {
        assert_eq!(default_filter_directive(false), "info");
        assert!(default_filter_directive(true).contains("urban3d=debug"));
    }

    #[test]
    fn test_guard_structure() {
        use tracing_appender::non_blocking::NonBlocking;

        let (non_blocking, guard) = NonBlocking::new(std::io::sink());
        drop(non_blocking);

        let _logging_guard = LoggingGuard { _file_guard: guard };
    }

    // The global subscriber can only be installed once per process, so
    // init_logging itself is exercised by the CLI rather than here.
}

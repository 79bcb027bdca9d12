use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Set to any value to write a debug log
pub const DEBUG_ENV: &str = "PROBEMETA_DEBUG";

const LOG_FILE_PREFIX: &str = "probemeta.log";

/// Where the daily log files go: `<data dir>/probemeta`, or `./probemeta`
/// when the platform has no data directory.
pub fn log_dir() -> PathBuf {
    log_dir_in(dirs::data_dir())
}

fn log_dir_in(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join("probemeta")
}

/// Start file logging when `PROBEMETA_DEBUG` is set.
///
/// Stdout carries the report, so nothing is logged to the terminal. The
/// returned guard must be held until exit to flush buffered lines.
pub fn init_logging() -> Option<WorkerGuard> {
    std::env::var_os(DEBUG_ENV)?;
    init_file_logging(&log_dir())
}

fn init_file_logging(dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!(
            "probemeta: debug logging disabled, cannot create {}: {}",
            dir.display(),
            e
        );
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into());

    if tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        return None;
    }

    tracing::info!("probemeta {} logging to {}", env!("CARGO_PKG_VERSION"), dir.display());
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_under_data_dir() {
        let dir = log_dir_in(Some(PathBuf::from("/data")));
        assert_eq!(dir, PathBuf::from("/data/probemeta"));
    }

    #[test]
    fn test_log_dir_without_data_dir() {
        assert_eq!(log_dir_in(None), PathBuf::from("./probemeta"));
    }

    #[test]
    fn test_unwritable_log_dir_disables_logging() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, b"").unwrap();

        assert!(init_file_logging(&blocker.join("logs")).is_none());
    }
}

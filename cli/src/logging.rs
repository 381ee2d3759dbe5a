use std::path::Path;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::{runtime_dir, LogLevel};

pub const LOG_FILE_PREFIX: &str = "charge-monitor";
const KEEP_LOG_FILES: usize = 7;

static INIT: OnceLock<()> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Where log lines go. The server logs to a file once detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stderr,
    Both,
}

impl LogMode {
    fn writes_file(self) -> bool {
        matches!(self, LogMode::File | LogMode::Both)
    }

    fn writes_stderr(self) -> bool {
        matches!(self, LogMode::Stderr | LogMode::Both)
    }
}

/// Keeps the non-blocking file writer alive; drop it last.
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Install the global subscriber. Only the first call has any effect.
pub fn init(level: LogLevel, mode: LogMode, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let Some(level) = cli_override.unwrap_or(level).as_tracing_level() else {
            return;
        };

        let mut layers: Vec<BoxedLayer> = Vec::new();

        if mode.writes_file() {
            match file_appender(&runtime_dir()) {
                Some(appender) => {
                    let (writer, file_guard) = tracing_appender::non_blocking(appender);
                    layers.push(file_layer(writer, level));
                    guard = Some(file_guard);
                }
                None if mode == LogMode::File => {
                    eprintln!("Warning: file logging unavailable, logs are discarded");
                }
                None => {}
            }
        }
        if mode.writes_stderr() {
            layers.push(stderr_layer(level));
        }

        tracing_subscriber::registry().with(layers).init();
    });

    LogGuard { _guard: guard }
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

fn file_layer(writer: NonBlocking, level: Level) -> BoxedLayer {
    fmt::layer()
        .with_writer(writer)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter(level))
        .boxed()
}

fn stderr_layer(level: Level) -> BoxedLayer {
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_filter(env_filter(level))
        .boxed()
}

fn file_appender(log_dir: &Path) -> Option<RollingFileAppender> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Warning: cannot create log directory {:?}: {}", log_dir, e);
        return None;
    }

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(KEEP_LOG_FILES)
        .build(log_dir)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_mode_sinks() {
        assert!(LogMode::File.writes_file() && !LogMode::File.writes_stderr());
        assert!(!LogMode::Stderr.writes_file() && LogMode::Stderr.writes_stderr());
        assert!(LogMode::Both.writes_file() && LogMode::Both.writes_stderr());
    }

    #[test]
    fn test_file_appender_creates_log_dir() {
        let td = TempDir::new().unwrap();
        let log_dir = td.path().join("nested").join("logs");

        assert!(file_appender(&log_dir).is_some());
        assert!(log_dir.is_dir());
    }
}

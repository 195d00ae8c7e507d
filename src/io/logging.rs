use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::model::config::LogConfig;

/// Error type for log setup
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid log file path: {0}")]
    InvalidPath(PathBuf),
    #[error("could not create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not open log file {path}: {source}")]
    Open { path: PathBuf, source: InitError },
    #[error("invalid log level {level:?}: {source}")]
    InvalidLevel { level: String, source: ParseError },
}

/// Crates whose events reach the log file: the library and the `todo` binary
const LOG_TARGETS: [&str; 2] = ["todomvc", "todo"];

/// Install a file-backed tracing subscriber.
///
/// The terminal belongs to the UI, so log output only ever goes to a file.
/// Returns `None` when no log file is configured. The returned guard must
/// be held until exit so buffered lines get flushed.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, LogError> {
    let Some(file) = config.file.as_deref() else {
        return Ok(None);
    };
    let (dir, name) = split_log_path(file)?;
    // A bad configured level is reported even when RUST_LOG overrides it
    let config_filter = level_filter(&config.level)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(config_filter);

    std::fs::create_dir_all(dir).map_err(|e| LogError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy().into_owned())
        .build(dir)
        .map_err(|e| LogError::Open {
            path: file.to_path_buf(),
            source: e,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // Global subscriber already installed; dropping the guard shuts the writer down.
        Err(_) => Ok(None),
    }
}

/// Filter admitting `level` and above from this crate's targets
fn level_filter(level: &str) -> Result<EnvFilter, LogError> {
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::try_new(directives).map_err(|e| LogError::InvalidLevel {
        level: level.to_string(),
        source: e,
    })
}

fn split_log_path(file: &Path) -> Result<(&Path, &std::ffi::OsStr), LogError> {
    let name = file
        .file_name()
        .ok_or_else(|| LogError::InvalidPath(file.to_path_buf()))?;
    let dir = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, name))
}

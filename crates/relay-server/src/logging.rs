//! Tracing subscriber setup.

use crate::config::LoggingConfig;
use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to prepare log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("log file path has no file name: {0}")]
    InvalidPath(String),

    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs the global subscriber: console output, plus a plain-text copy in
/// `config.file` unless it is blank.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match config.file_path() {
        Some(path) => {
            let path = Path::new(path);
            let file_name = path
                .file_name()
                .ok_or_else(|| LoggingError::InvalidPath(path.display().to_string()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if config.json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer()).try_init()?;
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_without_file_name() {
        let config = LoggingConfig {
            file: Some("..".to_string()),
            ..LoggingConfig::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::InvalidPath(_))));
    }
}

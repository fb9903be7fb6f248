//! Tracing subscriber setup shared by the binaries

use crate::config::LoggingConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log level {level:?}: {error}")]
    InvalidLevel { level: String, error: String },

    #[error("Failed to create log directory {path:?}: {error}")]
    LogDir { path: String, error: String },

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Anything other than "json" is pretty
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Build the level filter. `RUST_LOG` takes precedence over the
/// configured level.
pub fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel {
        level: level.to_string(),
        error: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// When a log file is configured, the returned guard flushes it on drop
/// and must be held for the life of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = env_filter(&config.level)?;
    let format = LogFormat::parse(&config.format);

    let mut layers: Vec<BoxedLayer> = vec![match format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
    }];

    let guard = match config.file.as_deref() {
        Some(path) => {
            let (layer, guard) = file_layer(Path::new(path), format)?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(guard)
}

fn file_layer(path: &Path, format: LogFormat) -> Result<(BoxedLayer, WorkerGuard), LoggingError> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "cycle-wellness.log".to_string());

    std::fs::create_dir_all(dir).map_err(|e| LoggingError::LogDir {
        path: dir.display().to_string(),
        error: e.to_string(),
    })?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
    };
    Ok((layer, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
    }

    #[test]
    fn test_file_layer_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logs").join("cw.log");

        let (_layer, _guard) = file_layer(&path, LogFormat::Json).unwrap();
        assert!(tmp.path().join("logs").is_dir());
    }
}

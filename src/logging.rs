//! Logging utilities wrapping `tracing` initialisation
//!
//! Console diagnostics go to stderr so stdout carries only the confirmation line.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Flushes the file sink when dropped; hold it until the process is done logging.
#[must_use = "dropping the guard stops the file log writer"]
#[derive(Debug, Default)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialise the global tracing subscriber according to the provided logging options.
///
/// Subsequent calls are ignored to avoid reinitialisation panics.
pub fn init(options: &LoggingOptions) -> Result<LogGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LogGuard::default());
    }

    let env_filter = filter(&options.level)?;

    let mut guard = LogGuard::default();
    match file_layer::<LayeredEnvFilter>(options)? {
        Some((file_layer, file_guard)) => {
            guard._file = Some(file_guard);
            Registry::default()
                .with(env_filter)
                .with(file_layer)
                .with(stderr_layer::<_>(options.color))
                .try_init()
        }
        None => Registry::default()
            .with(env_filter)
            .with(stderr_layer::<LayeredEnvFilter>(options.color))
            .try_init(),
    }
    .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(guard)
}

/// Parse a level or filter directive such as `info` or `qrlocal=debug`.
pub fn filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))
}

type LayeredEnvFilter = Layered<EnvFilter, Registry>;
type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn file_layer<S>(options: &LoggingOptions) -> Result<Option<(BoxedLayer<S>, WorkerGuard)>>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    let path = match options.file.as_ref() {
        Some(path) => path,
        None => return Ok(None),
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let (non_blocking, guard) = match options.rotation {
        Some(rotation) => {
            let file_name = path.file_name().ok_or_else(|| {
                Error::Config(format!(
                    "Log file path '{}' must include a filename when rotation is enabled",
                    path.display()
                ))
            })?;

            let appender = match rotation {
                LogRotation::Hourly => rolling::hourly(dir, file_name),
                LogRotation::Daily => rolling::daily(dir, file_name),
            };

            non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(appender)
        }
        None => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Failed to open log file {}: {e}", path.display()))
                })?;

            non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(file)
        }
    };

    Ok(Some((
        fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_target(true)
            .with_level(true)
            .boxed(),
        guard,
    )))
}

fn stderr_layer<S>(color: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .with_ansi(color)
        .with_target(true)
        .with_level(true)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        assert!(filter("info").is_ok());
        assert!(filter("qrlocal=debug,warn").is_ok());
    }

    #[test]
    fn test_filter_rejects_garbage() {
        assert!(matches!(filter("qrlocal=loud"), Err(Error::Config(_))));
    }
}

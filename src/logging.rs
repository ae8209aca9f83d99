use std::fs;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt, EnvFilter, Layer};

use crate::config::types::LoggingConfig;

fn daily_file(
    config: &LoggingConfig,
    prefix: &str,
    retention_days: usize,
    guards: &mut Vec<WorkerGuard>,
) -> Result<NonBlocking, InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(retention_days)
        .build(&config.log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    guards.push(guard);
    Ok(writer)
}

/// Installs the global subscriber.
///
/// `info.*.log` gets everything but ERROR, `error.*.log` only ERROR, and stdout
/// follows `RUST_LOG` (default `info`). Keep the returned guards alive or
/// buffered lines are dropped on exit.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
    fs::create_dir_all(&config.log_dir)?;

    let mut guards = Vec::new();
    let general = daily_file(config, "info", config.general_log_retention_days, &mut guards)?;
    let errors = daily_file(config, "error", config.error_log_retention_days, &mut guards)?;
    let (console, console_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(console_guard);

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(general)
                .with_ansi(false)
                .with_filter(filter::filter_fn(|meta| *meta.level() != Level::ERROR)),
        )
        .with(
            fmt::layer()
                .with_writer(errors)
                .with_ansi(false)
                .with_filter(filter::filter_fn(|meta| *meta.level() == Level::ERROR)),
        )
        .with(fmt::layer().with_writer(console).with_filter(console_filter))
        .try_init()?;

    Ok(guards)
}

//! Tracing setup for the CLI.

use anyhow::{Context, Result};
use pyra_icon_normalizer::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Application-specific environment variable for log filtering (overrides config).
pub const LOG_ENV_VAR: &str = "PYRA_ICON_LOG";

/// Build the log filter from an explicit override, else the configured level.
///
/// A malformed override is an error rather than a silent fallback.
pub fn filter_from(env_override: Option<&str>, config: &LoggingConfig) -> Result<EnvFilter> {
    match env_override.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => EnvFilter::builder()
            .parse(directives)
            .with_context(|| format!("Invalid {LOG_ENV_VAR} filter: {directives}")),
        None => EnvFilter::builder()
            .parse(config.level.as_directive())
            .context("Failed to build log filter from config"),
    }
}

/// Build the log filter: `PYRA_ICON_LOG` if set, else the configured level.
pub fn filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let env_override = std::env::var(LOG_ENV_VAR).ok();
    filter_from(env_override.as_deref(), config)
}

/// Install the global subscriber.
///
/// Logs go to stderr, or to `logging.file` / the state directory when set.
/// The returned guard must stay alive for file output to be flushed.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = filter(config)?;
    let log_path = config.log_file().context("Failed to determine log path")?;

    let (file_layer, guard) = match &log_path {
        Some(log_path) => {
            let log_dir = log_path.parent().context("Log path has no parent")?;
            let log_filename = log_path.file_name().context("Log path has no file name")?;

            let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };
    let stderr_layer = log_path
        .is_none()
        .then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter)
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "logging_test.rs"]
mod tests;

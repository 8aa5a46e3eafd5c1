use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use super::config::AppConfig;

/// Routes `tracing` output to the log file in the data directory; the
/// terminal itself is owned by the UI. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init_logging(config: &AppConfig) -> std::io::Result<WorkerGuard> {
    fs::create_dir_all(&config.storage.data_dir)?;
    let appender = tracing_appender::rolling::never(&config.storage.data_dir, &config.logging.file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}

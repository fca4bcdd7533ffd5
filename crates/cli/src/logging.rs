//! Tracing setup

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing output
///
/// Every command logs to stderr. Long-running watch sessions also log to a
/// daily-rolling file so a crash mid-session leaves something to read. The
/// returned guard must be held until exit or buffered lines are lost.
pub fn init(with_file_log: bool) -> Option<WorkerGuard> {
    if !with_file_log {
        tracing_subscriber::fmt::init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(log_dir(), "watch.log");
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    Some(guard)
}

fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("savepoint")
        .join("logs")
}

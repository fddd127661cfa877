//! Per-invocation logging setup.
//!
//! Two sinks, mirroring the original tool's console/file split:
//! - console: terse, warnings and errors only unless `--debug`;
//! - file: daily-rolling log under the application directory, at INFO
//!   (DEBUG with `--debug`).

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::utils::paths::app_dir;

/// Initialize console + rolling-file logging.
///
/// Returns the appender's worker guard: keep it alive until the process
/// exits so buffered log lines are flushed. Safe to call when a
/// subscriber is already installed (the second install is a no-op).
pub fn init(debug: bool) -> WorkerGuard {
    let log_dir = app_dir();
    if let Err(err) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "warning: could not create log directory {}: {err}",
            log_dir.display()
        );
    }

    let appender = tracing_appender::rolling::daily(&log_dir, "input-simulation.log");
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let console_level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let file_level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let console_layer = fmt::layer().with_target(false).with_filter(console_level);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(file_level);

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
    guard
}

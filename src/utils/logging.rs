use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// File name prefix of the rotating log files
const LOG_FILE_NAME: &str = "workflow-editor.log";

/// Builds the level filter. `RUST_LOG` wins over the level given on the command line.
fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match EnvFilter::try_new(log_level) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            EnvFilter::new("info")
        }
    }
}

/// Initialize the logging system.
///
/// Events go to stderr so they never mix with the editor output on stdout.
/// When `log_dir` is given they are also written to daily rotating files there.
///
/// # Arguments
///
/// * `log_level` - The desired log level as a string (e.g. "info", "debug", "warn")
/// * `log_dir` - Optional directory for the rotating log files
///
/// # Example
///
/// ```no_run
/// workflow_editor::utils::init_logging("info", None);
/// ```
pub fn init_logging(log_level: &str, log_dir: Option<&Path>) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true);

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);
        fmt::layer()
            .with_ansi(false)
            .with_line_number(true)
            .with_writer(appender)
    });

    let result = tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

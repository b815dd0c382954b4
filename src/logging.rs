//! Logging setup for VDRIVE.
//!
//! The server logs to stdout and to a configured file at once; tests and
//! one-off tools use the console-only variant.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Map a configured level name to a tracing level. Unknown names fall back
/// to INFO rather than failing startup.
fn level_from_name(name: &str) -> Level {
    match name.trim().to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

fn open_log_file(path: &str) -> Result<File> {
    if let Some(dir) = Path::new(path).parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(File::create(path)?)
}

/// Initialize logging per the `[logging]` config section: stdout plus the
/// configured log file, no ANSI color in the file-shared stream.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = level_from_name(&config.level);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let log_file = Arc::new(open_log_file(&config.file)?);
    let sink = std::io::stdout.and(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(sink)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Console-only logging for development and tests.
pub fn init_console_only(level: &str) {
    let filter = EnvFilter::from_default_env().add_directive(level_from_name(level).into());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_name_known() {
        assert_eq!(level_from_name("trace"), Level::TRACE);
        assert_eq!(level_from_name("DEBUG"), Level::DEBUG);
        assert_eq!(level_from_name(" info "), Level::INFO);
        assert_eq!(level_from_name("warning"), Level::WARN);
        assert_eq!(level_from_name("error"), Level::ERROR);
    }

    #[test]
    fn test_level_from_name_fallback() {
        assert_eq!(level_from_name("loud"), Level::INFO);
        assert_eq!(level_from_name(""), Level::INFO);
    }
}

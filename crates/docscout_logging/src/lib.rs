//! Shared logging setup for docscout binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "docscout=info";

/// Logging configuration for a docscout binary.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Mirror the full filter to stderr instead of warnings only.
    pub verbose: bool,
    /// Also append plain-text logs to this file.
    pub log_file: Option<&'a Path>,
}

/// Keeps the background file writer alive. Drop it last in `main`.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize tracing with stderr output and an optional log file.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let console_filter = if config.verbose {
        env_filter()
    } else {
        EnvFilter::new("warn")
    };

    let mut guard = None;
    let file_layer = match config.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path, config.app_name)?;
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, worker) = tracing_appender::non_blocking(appender);
            guard = Some(worker);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(env_filter()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { _file: guard })
}

/// `RUST_LOG` when set, otherwise the default filter.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Split a log file path into its directory and file name.
///
/// A path without a file name (e.g. `logs/`) gets `<app_name>.log`.
fn split_log_path(path: &Path, app_name: &str) -> Result<(PathBuf, String)> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if path.as_os_str().to_string_lossy().ends_with(|c: char| c == '/' || c == '\\') {
        return Ok((path.to_path_buf(), format!("{}.log", sanitize_name(app_name))));
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    Ok((dir, file_name))
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

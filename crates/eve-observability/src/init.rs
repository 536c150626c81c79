// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for EVE
//!
//! Console output always goes to stderr so it never interleaves with the
//! interactive menus on stdout. With the `file-logging` feature, every run
//! also gets its own folder with a JSON log file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Keeps file writers alive; logs are flushed when this is dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Folder of the current run, when file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

fn build_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(default_level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

fn console_layer(filter: EnvFilter) -> Box<dyn Layer<Registry> + Send + Sync> {
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(filter)
        .boxed()
}

/// Initialize console-only logging
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags
/// * `default_level` - Level for everything not covered by a debug flag
pub fn init_console_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
) -> Result<LoggingGuard> {
    let filter = build_filter(debug_flags, default_level)?;

    Registry::default()
        .with(vec![console_layer(filter)])
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guard: None,
        log_dir: None,
    })
}

/// Initialize logging with console output and a per-run JSON log file
///
/// Creates a timestamped folder structure:
/// ```text
/// ./logs/
///   └── run_20250101_120000/
///       └── eve.log
/// ```
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `default_level` - Level for everything not covered by a debug flag
/// * `log_dir` - Base directory for logs (default: `./logs`)
/// * `retention_days` - Keep logs for N days (default: 30)
/// * `retention_runs` - Keep N most recent runs (default: 10)
#[cfg(feature = "file-logging")]
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
    log_dir: Option<PathBuf>,
    retention_days: Option<u64>,
    retention_runs: Option<usize>,
) -> Result<LoggingGuard> {
    use tracing_appender::rolling;

    let base_log_dir = log_dir.unwrap_or_else(|| PathBuf::from("./logs"));

    let timestamp = chrono::Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_logs(&base_log_dir, retention_days, retention_runs)?;

    let file_appender = rolling::never(&run_folder, "eve.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_filter(debug_flags, default_level)?)
        .boxed();

    let layers = vec![console_layer(build_filter(debug_flags, default_level)?), file_layer];

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard {
        _file_guard: Some(guard),
        log_dir: Some(run_folder),
    })
}

#[cfg(feature = "file-logging")]
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Remove run folders older than `retention_days`, then trim to the newest `retention_runs`
#[cfg(feature = "file-logging")]
fn cleanup_old_logs(
    base_log_dir: &Path,
    retention_days: Option<u64>,
    retention_runs: Option<usize>,
) -> Result<()> {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

    if !base_log_dir.exists() {
        return Ok(());
    }

    let retention_days = retention_days.unwrap_or(30);
    let retention_runs = retention_runs.unwrap_or(10);
    let cutoff_date = Utc::now() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|name| name.strip_prefix("run_"))
            .and_then(|stamp| NaiveDateTime::parse_from_str(stamp, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(started) = started {
            runs.push((path, Utc.from_utc_datetime(&started)));
        }
    }

    // Oldest first
    runs.sort_by_key(|(_, started)| *started);

    let expired = runs.iter().filter(|(_, started)| *started < cutoff_date).count();
    let over_limit = runs.len().saturating_sub(expired).saturating_sub(retention_runs);

    for (path, _) in runs.iter().take(expired + over_limit) {
        if let Err(e) = std::fs::remove_dir_all(path) {
            tracing::warn!("Failed to remove old log directory {}: {}", path.display(), e);
        }
    }

    Ok(())
}

#[cfg(all(test, feature = "file-logging"))]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_keeps_newest_runs() {
        let dir = tempfile::tempdir().unwrap();
        let now = chrono::Utc::now();
        for hours_ago in 0..5 {
            let stamp = (now - chrono::Duration::hours(hours_ago)).format(RUN_TIMESTAMP_FORMAT);
            std::fs::create_dir_all(dir.path().join(format!("run_{}", stamp))).unwrap();
        }
        std::fs::create_dir_all(dir.path().join("not_a_run")).unwrap();

        cleanup_old_logs(dir.path(), Some(30), Some(2)).unwrap();

        let remaining: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(remaining.iter().filter(|n| n.starts_with("run_")).count(), 2);
        assert!(remaining.contains(&"not_a_run".to_string()));
    }

    #[test]
    fn test_cleanup_removes_expired_runs() {
        let dir = tempfile::tempdir().unwrap();
        let old = (chrono::Utc::now() - chrono::Duration::days(40)).format(RUN_TIMESTAMP_FORMAT);
        let old_dir = dir.path().join(format!("run_{}", old));
        std::fs::create_dir_all(&old_dir).unwrap();

        cleanup_old_logs(dir.path(), Some(30), Some(10)).unwrap();

        assert!(!old_dir.exists());
    }
}

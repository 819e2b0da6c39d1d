// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Console + file logging, and the narrow log interface the engine writes to.

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::time::ChronoLocal, prelude::*, EnvFilter};

/// Target of every outcome line, shown in both outputs.
pub const LOG_TARGET: &str = "w3f";

const DEFAULT_FILTER: &str = "info";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Log file path has no file name: {0}")]
    FileName(PathBuf),

    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Initialize console (colored) and append-only file logging.
///
/// Returns a guard that must be kept alive until exit so buffered lines reach
/// the file.
pub fn init_logging(log_file: &Path) -> Result<WorkerGuard, LoggingError> {
    let (dir, file_name) = split_log_path(log_file)?;
    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::Directory {
        path: dir.clone(),
        source,
    })?;

    // `never` rotates nothing and opens the file in append mode.
    let file_appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(
            fmt::layer()
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_target(true)
                .compact(),
        )
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(guard)
}

fn split_log_path(log_file: &Path) -> Result<(PathBuf, &std::ffi::OsStr), LoggingError> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| LoggingError::FileName(log_file.to_path_buf()))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}

/// Where transfer and deployment outcomes are reported.
pub trait TransferLog {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

impl<T: TransferLog + ?Sized> TransferLog for &T {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// [`TransferLog`] backed by the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl TransferLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!(target: LOG_TARGET, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: LOG_TARGET, "{message}");
    }
}

/// Keeps every line in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingLog {
    infos: std::sync::Mutex<Vec<String>>,
    errors: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingLog {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl TransferLog for RecordingLog {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

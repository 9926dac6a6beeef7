//! Console logger that forwards to `tracing` and tallies problems.
use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::{Log, LogLevel};

/// Logger used by the binary.
///
/// Each message becomes a single `tracing` event; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) decides where it
/// goes.  Low-info messages use the `dotlink::lowinfo` target so `--quiet`
/// can filter them without touching plain info.
#[derive(Debug, Default)]
pub struct Logger {
    warnings: AtomicUsize,
    errors: AtomicUsize,
}

impl Logger {
    /// Create a logger with zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warnings: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        }
    }

    /// Number of warnings logged so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Number of errors logged so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }
}

impl Log for Logger {
    fn log(&self, level: LogLevel, msg: &str) {
        match level {
            LogLevel::Debug => tracing::debug!("{msg}"),
            LogLevel::LowInfo => tracing::info!(target: "dotlink::lowinfo", "{msg}"),
            LogLevel::Info => tracing::info!("{msg}"),
            LogLevel::Warn => {
                self.warnings.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("{msg}");
            }
            LogLevel::Error => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                tracing::error!("{msg}");
            }
        }
    }
}

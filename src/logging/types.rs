//! Core logging types: severities, console verbosity, and the [`Log`] trait.

/// Severity of a log message.
///
/// `LowInfo` sits between `Debug` and `Info`: routine per-item events
/// ("created", "already exists") that are shown by default but hidden by
/// `--quiet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Diagnostic detail, only shown with `--verbose`.
    Debug,
    /// Routine per-item event.
    LowInfo,
    /// Batch-level progress and summaries.
    Info,
    /// A problem with one item; processing continues.
    Warn,
    /// A failure that affects the overall result.
    Error,
}

/// How much the console shows.
///
/// # Examples
///
/// ```
/// use dotlink_cli::logging::Verbosity;
///
/// assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
/// assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Quiet);
/// assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Silent);
/// assert_eq!(Verbosity::from_flags(true, 0), Verbosity::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Warnings and errors only.
    Silent,
    /// Info and above; low-info is hidden.
    Quiet,
    /// Low-info and above (default).
    Normal,
    /// Everything, including debug.
    Verbose,
}

impl Verbosity {
    /// Derive the verbosity from the `--verbose` flag and the `--quiet` count.
    ///
    /// `--verbose` wins when both are given.
    #[must_use]
    pub const fn from_flags(verbose: bool, quiet: u8) -> Self {
        if verbose {
            return Self::Verbose;
        }
        match quiet {
            0 => Self::Normal,
            1 => Self::Quiet,
            _ => Self::Silent,
        }
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing`; tests substitute
/// an in-memory recorder so they can assert on exact messages.  Every call
/// produces exactly one line, which keeps output readable when links are
/// reconciled in parallel.
pub trait Log: Send + Sync {
    /// Emit one message at `level`.
    fn log(&self, level: LogLevel, msg: &str);

    /// Log a debug message.
    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg);
    }

    /// Log a routine per-item event.
    fn lowinfo(&self, msg: &str) {
        self.log(LogLevel::LowInfo, msg);
    }

    /// Log an informational message.
    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg);
    }

    /// Log a warning.
    fn warn(&self, msg: &str) {
        self.log(LogLevel::Warn, msg);
    }

    /// Log an error.
    fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg);
    }
}

//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::{LevelFilter, Targets};

use super::types::Verbosity;
use super::utils::{format_utc_datetime, format_utc_time, strip_ansi};

/// Target used for low-info events.
const LOWINFO_TARGET: &str = "dotlink::lowinfo";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends every event to a log file
/// with timestamps and ANSI codes stripped.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open (or create) `path`, append a run header, and return a layer
    /// ready to receive events.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file or its directory cannot be created
    /// or written.
    pub(super) fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let version =
            option_env!("DOTLINK_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        writeln!(
            file,
            "==========================================\n\
             dotlink {version} {}\n\
             ==========================================",
            format_utc_datetime(),
        )?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let level = *metadata.level();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_utc_time();

        let line = match level {
            tracing::Level::ERROR => format!("[{ts}] [error] {msg}"),
            tracing::Level::WARN => format!("[{ts}] [warn] {msg}"),
            tracing::Level::DEBUG | tracing::Level::TRACE => format!("[{ts}] [debug] {msg}"),
            tracing::Level::INFO => format!("[{ts}] {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits dotlink-style
/// console output.
struct DotlinkFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for DotlinkFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match level {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if target == LOWINFO_TARGET => writeln!(writer, "  {msg}"),
            tracing::Level::INFO => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Console filter for the given verbosity.
fn console_filter(verbosity: Verbosity) -> Targets {
    match verbosity {
        Verbosity::Verbose => Targets::new().with_default(LevelFilter::DEBUG),
        Verbosity::Normal => Targets::new().with_default(LevelFilter::INFO),
        Verbosity::Quiet => Targets::new()
            .with_default(LevelFilter::INFO)
            .with_target(LOWINFO_TARGET, LevelFilter::WARN),
        Verbosity::Silent => Targets::new().with_default(LevelFilter::WARN),
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// The console layer writes warnings and errors to stderr and everything
/// else to stdout, filtered by `verbosity`.  When `log_file` is given, a file
/// layer records every event (debug included) regardless of verbosity.
/// A log file that cannot be opened is reported as a warning once the console
/// layer is live; the run continues without it.
///
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbosity: Verbosity, log_file: Option<&Path>) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let make_writer = io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(DotlinkFormatter)
        .with_writer(make_writer)
        .with_filter(console_filter(verbosity));

    let (file_layer, file_error) = match log_file.map(|path| (path, FileLayer::new(path))) {
        Some((_, Ok(layer))) => (Some(layer.with_filter(LevelFilter::DEBUG)), None),
        Some((path, Err(e))) => (None, Some(log_file_warning(path, &e))),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(msg) = file_error {
        tracing::warn!("{msg}");
    }
}

/// Warning shown when `--log-file` cannot be opened.
fn log_file_warning(path: &Path, err: &io::Error) -> String {
    format!("Cannot write log file {}: {err}", path.display())
}

// Shared helpers for integration tests.
//
// Provides a temporary dotfiles checkout next to a fake home directory, plus
// a fluent builder, so each test can describe its starting filesystem and run
// the install command without touching the real home.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use dotlink_cli::cli::Cli;
use dotlink_cli::commands::install;
use dotlink_cli::logging::{Log, LogLevel};

/// [`Log`] that keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLog {
    /// Messages recorded at exactly `level`, in order.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .lock()
            .expect("log lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// Whether any warning or error was recorded.
    pub fn has_problems(&self) -> bool {
        self.entries
            .lock()
            .expect("log lock")
            .iter()
            .any(|(l, _)| *l >= LogLevel::Warn)
    }
}

impl Log for MemoryLog {
    fn log(&self, level: LogLevel, msg: &str) {
        self.entries
            .lock()
            .expect("log lock")
            .push((level, msg.to_string()));
    }
}

/// A dotfiles checkout (`base`) and a home directory in one temp dir.
///
/// Both paths are canonical so they compare equal to what the command
/// resolves and writes into links.
pub struct TestEnv {
    _root: tempfile::TempDir,
    /// Directory holding the config file and link sources.
    pub base: PathBuf,
    /// Directory `~` expands to.
    pub home: PathBuf,
}

/// Outcome of one command run.
pub struct RunResult {
    /// What [`install::execute`] returned.
    pub result: anyhow::Result<bool>,
    /// Everything that was logged.
    pub log: Arc<MemoryLog>,
}

impl RunResult {
    /// The run completed and every directive succeeded.
    pub fn succeeded(&self) -> bool {
        matches!(self.result, Ok(true))
    }

    /// The run completed but some directive failed.
    pub fn failed(&self) -> bool {
        matches!(self.result, Ok(false))
    }

    /// Warning messages, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.log.messages(LogLevel::Warn)
    }
}

impl TestEnv {
    /// Create an empty base directory and home.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let canonical = dunce::canonicalize(root.path()).expect("canonicalize temp dir");
        let base = canonical.join("dotfiles");
        let home = canonical.join("home");
        std::fs::create_dir_all(&base).expect("create base dir");
        std::fs::create_dir_all(&home).expect("create home dir");
        Self {
            _root: root,
            base,
            home,
        }
    }

    /// Path of `rel` inside the base directory.
    pub fn base_path(&self, rel: &str) -> PathBuf {
        self.base.join(rel)
    }

    /// Path of `rel` inside the home directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.join(rel)
    }

    /// Run the install command with `config` and extra CLI arguments.
    pub fn run(&self, config: &Path, args: &[&str]) -> RunResult {
        let config = config.to_string_lossy().into_owned();
        let argv = ["dotlink", "-c", config.as_str()]
            .into_iter()
            .chain(args.iter().copied());
        let cli = Cli::parse_from(argv);
        let log = Arc::new(MemoryLog::default());
        let shared: Arc<dyn Log> = log.clone();
        let result = install::execute(&cli, &self.home, &shared);
        RunResult { result, log }
    }
}

/// Fluent builder for [`TestEnv`].
pub struct TestEnvBuilder {
    env: TestEnv,
}

impl TestEnvBuilder {
    /// Begin from an empty base directory and home.
    pub fn new() -> Self {
        Self {
            env: TestEnv::new(),
        }
    }

    /// Create a source file in the base directory.
    pub fn with_source_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.env.base.join(rel), content);
        self
    }

    /// Create a source directory (with one file in it) in the base directory.
    pub fn with_source_dir(self, rel: &str) -> Self {
        write_file(&self.env.base.join(rel).join("init"), "");
        self
    }

    /// Create a regular file in the home directory.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.env.home.join(rel), content);
        self
    }

    /// Create a directory (with one file in it) in the home directory.
    pub fn with_home_dir(self, rel: &str) -> Self {
        write_file(&self.env.home.join(rel).join("local"), "local");
        self
    }

    /// Write a config file into the base directory.
    pub fn with_config(self, name: &str, content: &str) -> Self {
        write_file(&self.env.base.join(name), content);
        self
    }

    /// Finish building.
    pub fn build(self) -> TestEnv {
        self.env
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

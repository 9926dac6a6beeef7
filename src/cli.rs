//! Command-line interface definition.
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::logging::Verbosity;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "install.conf.toml";

/// Top-level CLI entry point for the link reconciler.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dotlink",
    about = "Reconcile declared dotfile symlinks against the filesystem",
    version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Directory relative link sources are resolved against (defaults to the config file's directory)
    #[arg(short = 'd', long)]
    pub base_directory: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Reduce output; repeat to show only warnings and errors
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Run only these directives
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these directives
    #[arg(long, value_delimiter = ',')]
    pub except: Vec<String>,

    /// Reconcile the entries of each link directive in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Also append every message, with timestamps, to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Console verbosity selected by `-v` / `-q`.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

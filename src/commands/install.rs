//! The install command: load a config file and run its directives.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::Config;
use crate::handlers::{self, Dispatcher, LinkerConfig};
use crate::logging::Log;
use crate::paths;

/// Run the install command against the real home directory.
///
/// # Errors
///
/// Returns an error if the home directory or base directory cannot be
/// determined, the configuration cannot be loaded, a directive is rejected,
/// or any directive reported a failure.
pub fn run(cli: &Cli, log: &Arc<dyn Log>) -> Result<()> {
    let home = paths::home_dir()?;
    if !execute(cli, &home, log)? {
        anyhow::bail!("one or more directives failed");
    }
    Ok(())
}

/// Load the configuration and dispatch every selected directive.
///
/// Returns whether every directive succeeded.  `home` is what `~` expands to.
///
/// # Errors
///
/// Returns an error if the base directory does not exist, the configuration
/// cannot be loaded, or a handler rejects its directive outright.
pub fn execute(cli: &Cli, home: &Path, log: &Arc<dyn Log>) -> Result<bool> {
    let version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.debug(&format!("dotlink {version}"));

    let base_directory = resolve_base_directory(cli.base_directory.as_deref(), &cli.config)?;
    log.debug(&format!("base directory: {}", base_directory.display()));

    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?
        .filtered(&cli.only, &cli.except);
    log.debug(&format!(
        "{} directive(s) selected from {}",
        config.directives.len(),
        config.path.display()
    ));

    let linker = LinkerConfig {
        base_directory,
        home: home.to_path_buf(),
        parallel: cli.parallel,
    };
    let dispatcher = Dispatcher::new(
        handlers::all_handlers(linker, Arc::clone(log)),
        Arc::clone(log),
    );
    let success = dispatcher.dispatch(&config.directives)?;

    if success {
        log.info("All tasks executed successfully");
    } else {
        log.error("Some tasks were not executed successfully");
    }
    Ok(success)
}

/// Determine the absolute base directory.
///
/// An explicit directory wins; otherwise the config file's own directory is
/// used.  The result is canonical and must exist.
///
/// # Errors
///
/// Returns an error if the directory does not exist or cannot be resolved.
pub fn resolve_base_directory(explicit: Option<&Path>, config: &Path) -> Result<PathBuf> {
    let dir = explicit.map_or_else(
        || {
            config
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    );
    dunce::canonicalize(&dir)
        .with_context(|| format!("base directory {} does not exist", dir.display()))
}

//! The `link` directive: reconcile declared symlinks against the filesystem.
use rayon::prelude::*;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::Handler;
use crate::config::links::{self, LinkSpec};
use crate::error::DirectiveError;
use crate::logging::Log;
use crate::paths::expand_home;
use crate::resources::fs::{FileSystemOps, SystemFileSystemOps};
use crate::resources::symlink::SymlinkResource;
use crate::resources::{LinkOutcome, LinkState};

/// Paths and options the linker resolves entries against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerConfig {
    /// Absolute directory relative sources are joined onto.
    pub base_directory: PathBuf,
    /// Directory `~` expands to in destinations.
    pub home: PathBuf,
    /// Reconcile entries on the rayon pool instead of one by one.
    pub parallel: bool,
}

/// Counters for one reconciled batch.
///
/// # Examples
///
/// ```
/// use dotlink_cli::handlers::link::LinkStats;
///
/// let stats = LinkStats { created: 2, already_ok: 5, failed: 0 };
/// assert_eq!(stats.summary(), "2 created, 5 already ok");
///
/// let stats = LinkStats { created: 0, already_ok: 1, failed: 3 };
/// assert_eq!(stats.summary(), "0 created, 1 already ok, 3 failed");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    /// Links created in this run.
    pub created: u32,
    /// Links that were already correct.
    pub already_ok: u32,
    /// Entries that could not be reconciled.
    pub failed: u32,
}

impl LinkStats {
    /// Tally a list of outcomes.
    #[must_use]
    pub fn from_outcomes(outcomes: &[LinkOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut stats, outcome| {
            match outcome {
                LinkOutcome::Created => stats.created += 1,
                LinkOutcome::AlreadyCorrect => stats.already_ok += 1,
                LinkOutcome::Failed => stats.failed += 1,
            }
            stats
        })
    }

    /// Format the counts for the batch summary line.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.failed > 0 {
            format!(
                "{} created, {} already ok, {} failed",
                self.created, self.already_ok, self.failed
            )
        } else {
            format!("{} created, {} already ok", self.created, self.already_ok)
        }
    }
}

/// Handler for the `link` directive.
///
/// Each entry is classified and acted on independently; problems are logged
/// as warnings and fold into the boolean result instead of aborting the batch.
pub struct Linker {
    config: LinkerConfig,
    log: Arc<dyn Log>,
    fs: Arc<dyn FileSystemOps>,
}

impl fmt::Debug for Linker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Linker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Linker {
    /// Directive name this handler owns.
    pub const DIRECTIVE: &'static str = "link";

    /// Create a linker that works on the real filesystem.
    #[must_use]
    pub fn new(config: LinkerConfig, log: Arc<dyn Log>) -> Self {
        Self {
            config,
            log,
            fs: Arc::new(SystemFileSystemOps),
        }
    }

    /// Create a linker over an injected filesystem.
    #[cfg(test)]
    pub(crate) fn with_fs_ops(
        config: LinkerConfig,
        log: Arc<dyn Log>,
        fs: Arc<dyn FileSystemOps>,
    ) -> Self {
        Self { config, log, fs }
    }

    /// Resolve a declared entry into concrete paths.
    ///
    /// `~` in the destination expands to the home directory; the source is
    /// joined onto the base directory (an absolute source replaces it).
    #[must_use]
    pub fn resolve(&self, spec: &LinkSpec) -> SymlinkResource {
        SymlinkResource::new(
            spec.destination.clone(),
            expand_home(&spec.destination, &self.config.home),
            self.config.base_directory.join(spec.source.path()),
            spec.source.force(),
        )
    }

    /// Reconcile every entry and return `true` iff all of them succeeded.
    ///
    /// Every entry is attempted regardless of earlier failures.  Exactly one
    /// summary line is logged per call.
    #[must_use]
    pub fn reconcile(&self, specs: &[LinkSpec]) -> bool {
        let resources: Vec<SymlinkResource> = specs.iter().map(|s| self.resolve(s)).collect();
        self.log.debug(&format!(
            "reconciling {} link(s) against {}",
            resources.len(),
            self.config.base_directory.display()
        ));

        let outcomes: Vec<LinkOutcome> = if self.config.parallel {
            resources
                .par_iter()
                .map(|r| self.reconcile_entry(r))
                .collect()
        } else {
            resources.iter().map(|r| self.reconcile_entry(r)).collect()
        };

        let mut success = true;
        for outcome in &outcomes {
            success &= outcome.is_success();
        }

        let stats = LinkStats::from_outcomes(&outcomes);
        if success {
            self.log
                .info(&format!("All links have been set up ({})", stats.summary()));
        } else {
            self.log.error(&format!(
                "Some links were not successfully set up ({})",
                stats.summary()
            ));
        }
        success
    }

    /// Bring one destination in line with its source.
    ///
    /// With `force`, a non-link occupant is removed first.  A failed removal
    /// marks the entry failed but classification still runs against what is
    /// left, so the operator sees the remaining problem too.
    #[must_use]
    pub fn reconcile_entry(&self, resource: &SymlinkResource) -> LinkOutcome {
        let fs = self.fs.as_ref();
        let label = &resource.label;
        let source = resource.source.display();
        let mut cleared = true;

        if resource.force {
            match resource.clear_occupant(fs) {
                Ok(true) => self.log.lowinfo(&format!("Removing {label}")),
                Ok(false) => {}
                Err(e) => {
                    self.log.warn(&format!("Failed to remove {label}"));
                    self.log.debug(&format!("{label}: {e}"));
                    cleared = false;
                }
            }
        }

        let outcome = match resource.current_state(fs) {
            LinkState::OrphanedLink { current } => {
                self.log.warn(&format!(
                    "Invalid link {label} -> {}",
                    SymlinkResource::display_target(current.as_deref())
                ));
                LinkOutcome::Failed
            }
            LinkState::Missing => match resource.apply(fs) {
                Ok(()) => {
                    self.log
                        .lowinfo(&format!("Creating link {label} -> {source}"));
                    LinkOutcome::Created
                }
                Err(e) => {
                    self.log.warn(&format!("Linking failed {label} -> {source}"));
                    self.log.debug(&format!("{label}: {e}"));
                    LinkOutcome::Failed
                }
            },
            LinkState::NotALink => {
                self.log.warn(&format!(
                    "{label} already exists but is a regular file or directory"
                ));
                LinkOutcome::Failed
            }
            LinkState::Incorrect { current } => {
                self.log.warn(&format!(
                    "Incorrect link {label} -> {}",
                    SymlinkResource::display_target(current.as_deref())
                ));
                LinkOutcome::Failed
            }
            LinkState::SourceMissing { linked: true } => {
                self.log
                    .warn(&format!("Nonexistent target {label} -> {source}"));
                LinkOutcome::Failed
            }
            LinkState::SourceMissing { linked: false } => {
                self.log
                    .warn(&format!("Nonexistent target for {label} : {source}"));
                LinkOutcome::Failed
            }
            LinkState::Correct => {
                self.log.lowinfo(&format!("Link exists {label} -> {source}"));
                LinkOutcome::AlreadyCorrect
            }
        };

        if cleared { outcome } else { LinkOutcome::Failed }
    }
}

impl Handler for Linker {
    fn name(&self) -> &'static str {
        "linker"
    }

    fn can_handle(&self, directive: &str) -> bool {
        directive == Self::DIRECTIVE
    }

    fn handle(&self, directive: &str, data: &Value) -> Result<bool, DirectiveError> {
        if !self.can_handle(directive) {
            return Err(DirectiveError::Unsupported {
                handler: self.name().to_string(),
                directive: directive.to_string(),
            });
        }
        let specs = links::parse(directive, data)?;
        Ok(self.reconcile(&specs))
    }
}

//! Link resource primitives: inspect a destination, classify it, act on it.
pub mod fs;
pub mod symlink;

use std::path::PathBuf;

/// Classified state of one link destination, evaluated in fixed precedence.
///
/// Several underlying conditions can hold at once (a dangling link whose
/// source is also missing, say); the variant reported is the first match in
/// the order [`SymlinkResource::current_state`](symlink::SymlinkResource::current_state)
/// checks them, which also decides which warning the operator sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Destination fails the existence test but is still a symlink node
    /// pointing somewhere other than the source (a dangling foreign link).
    OrphanedLink {
        /// Resolved target of the existing link, if it could be read.
        current: Option<PathBuf>,
    },
    /// Destination is absent and the source exists: the link can be created.
    Missing,
    /// A regular file or directory occupies the destination.
    NotALink,
    /// Destination is a symlink to something other than the source.
    Incorrect {
        /// Resolved target of the existing link, if it could be read.
        current: Option<PathBuf>,
    },
    /// The source does not exist.
    SourceMissing {
        /// Whether the destination is already a symlink.
        linked: bool,
    },
    /// Destination is already a symlink to the source.
    Correct,
}

/// Final classification of one reconciled entry.
///
/// # Examples
///
/// ```
/// use dotlink_cli::resources::LinkOutcome;
///
/// assert!(LinkOutcome::Created.is_success());
/// assert!(LinkOutcome::AlreadyCorrect.is_success());
/// assert!(!LinkOutcome::Failed.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link was created.
    Created,
    /// The link already pointed at the source; nothing changed.
    AlreadyCorrect,
    /// The entry could not be reconciled (drift, missing source, or an
    /// I/O failure).
    Failed,
}

impl LinkOutcome {
    /// Whether the entry counts towards a successful batch.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

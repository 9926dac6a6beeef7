//! Symlink resource.
use std::io;
use std::path::{Path, PathBuf};

use super::LinkState;
use super::fs::FileSystemOps;
use crate::paths::paths_equal;

/// One desired link, with its paths already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymlinkResource {
    /// Destination exactly as declared (e.g. `~/.vimrc`), used in messages.
    pub label: String,
    /// Destination with `~` expanded: where the link must live.
    pub destination: PathBuf,
    /// Absolute path the link must point to.
    pub source: PathBuf,
    /// Whether a non-link occupant may be removed to make room.
    pub force: bool,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub fn new(label: impl Into<String>, destination: PathBuf, source: PathBuf, force: bool) -> Self {
        Self {
            label: label.into(),
            destination,
            source,
            force,
        }
    }

    /// Absolute target of the link currently at the destination.
    ///
    /// Relative link contents are resolved against the destination's parent
    /// directory.  Returns `None` when the destination is not a readable
    /// symlink.
    #[must_use]
    pub fn link_destination(&self, fs: &dyn FileSystemOps) -> Option<PathBuf> {
        let raw = fs.read_link(&self.destination).ok()?;
        Some(match self.destination.parent() {
            Some(parent) => parent.join(raw),
            None => raw,
        })
    }

    /// Inspect the destination and classify it.
    ///
    /// Conditions are checked in a fixed order and the first match wins.
    /// Nothing is cached: call this after any mutation (such as
    /// [`clear_occupant`](Self::clear_occupant)) to see the new state.
    #[must_use]
    pub fn current_state(&self, fs: &dyn FileSystemOps) -> LinkState {
        let exists = fs.exists(&self.destination);
        let is_link = fs.is_symlink(&self.destination);
        let current = if is_link {
            self.link_destination(fs)
        } else {
            None
        };
        let points_elsewhere = is_link
            && current
                .as_deref()
                .is_none_or(|c| !paths_equal(c, &self.source));

        if !exists && points_elsewhere {
            return LinkState::OrphanedLink { current };
        }
        if !exists && fs.exists(&self.source) {
            return LinkState::Missing;
        }
        if exists && !is_link {
            return LinkState::NotALink;
        }
        if points_elsewhere {
            return LinkState::Incorrect { current };
        }
        if !fs.exists(&self.source) {
            return LinkState::SourceMissing { linked: is_link };
        }
        LinkState::Correct
    }

    /// Remove whatever non-link entry occupies the destination.
    ///
    /// Directories are removed recursively.  Symlinks (correct or not) and
    /// absent destinations are left alone.  Returns `Ok(true)` if something
    /// was removed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if removal fails; the destination is
    /// left in whatever state the failed removal produced.
    pub fn clear_occupant(&self, fs: &dyn FileSystemOps) -> io::Result<bool> {
        if !fs.exists(&self.destination) || fs.is_symlink(&self.destination) {
            return Ok(false);
        }
        if fs.is_dir(&self.destination) {
            fs.remove_dir_all(&self.destination)?;
        } else {
            fs.remove_file(&self.destination)?;
        }
        Ok(true)
    }

    /// Create the link at the destination.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the link cannot be created.
    pub fn apply(&self, fs: &dyn FileSystemOps) -> io::Result<()> {
        fs.symlink(&self.source, &self.destination)
    }

    /// Display form of an optional link target for messages.
    #[must_use]
    pub fn display_target(current: Option<&Path>) -> String {
        current.map_or_else(|| "<unreadable>".to_string(), |p| p.display().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::fs::{MockFileSystemOps, SystemFileSystemOps};

    /// A base directory with a `vimrc` source and an empty home next to it.
    struct Fixture {
        _dir: tempfile::TempDir,
        source: PathBuf,
        home: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("dotfiles");
        let home = dir.path().join("home");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::create_dir_all(&home).unwrap();
        let source = base.join("vimrc");
        std::fs::write(&source, "set nocompatible").unwrap();
        Fixture {
            _dir: dir,
            source,
            home,
        }
    }

    fn resource(fx: &Fixture, force: bool) -> SymlinkResource {
        SymlinkResource::new(
            "~/.vimrc",
            fx.home.join(".vimrc"),
            fx.source.clone(),
            force,
        )
    }

    #[test]
    fn display_target_handles_unreadable() {
        assert_eq!(SymlinkResource::display_target(None), "<unreadable>");
        assert_eq!(
            SymlinkResource::display_target(Some(Path::new("/x"))),
            "/x"
        );
    }

    #[test]
    fn missing_when_destination_absent_and_source_present() {
        let fx = fixture();
        assert_eq!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::Missing
        );
    }

    #[test]
    fn source_missing_without_link() {
        let fx = fixture();
        std::fs::remove_file(&fx.source).unwrap();
        assert_eq!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::SourceMissing { linked: false }
        );
    }

    #[test]
    fn not_a_link_when_regular_file_occupies_destination() {
        let fx = fixture();
        std::fs::write(fx.home.join(".vimrc"), "local").unwrap();
        assert_eq!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::NotALink
        );
    }

    #[test]
    fn not_a_link_when_directory_occupies_destination() {
        let fx = fixture();
        std::fs::create_dir(fx.home.join(".vimrc")).unwrap();
        assert_eq!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::NotALink
        );
    }

    #[cfg(unix)]
    #[test]
    fn correct_when_link_points_to_source() {
        let fx = fixture();
        std::os::unix::fs::symlink(&fx.source, fx.home.join(".vimrc")).unwrap();
        assert_eq!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::Correct
        );
    }

    #[cfg(unix)]
    #[test]
    fn incorrect_when_link_points_elsewhere() {
        let fx = fixture();
        let other = fx.home.join("other");
        std::fs::write(&other, "other").unwrap();
        std::os::unix::fs::symlink(&other, fx.home.join(".vimrc")).unwrap();
        assert_eq!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::Incorrect {
                current: Some(other)
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn relative_link_contents_resolve_against_destination_parent() {
        let fx = fixture();
        std::fs::write(fx.home.join("local-vimrc"), "x").unwrap();
        std::os::unix::fs::symlink("local-vimrc", fx.home.join(".vimrc")).unwrap();
        let r = resource(&fx, false);
        assert_eq!(
            r.link_destination(&SystemFileSystemOps),
            Some(fx.home.join("local-vimrc"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn orphaned_when_dangling_link_points_elsewhere() {
        let fx = fixture();
        let gone = fx.home.join("gone");
        std::os::unix::fs::symlink(&gone, fx.home.join(".vimrc")).unwrap();
        assert_eq!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::OrphanedLink {
                current: Some(gone)
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_to_missing_source_reports_source_missing() {
        let fx = fixture();
        std::os::unix::fs::symlink(&fx.source, fx.home.join(".vimrc")).unwrap();
        std::fs::remove_file(&fx.source).unwrap();
        assert_eq!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::SourceMissing { linked: true }
        );
    }

    #[cfg(unix)]
    #[test]
    fn wrong_target_takes_precedence_over_missing_source() {
        let fx = fixture();
        let other = fx.home.join("other");
        std::fs::write(&other, "other").unwrap();
        std::os::unix::fs::symlink(&other, fx.home.join(".vimrc")).unwrap();
        std::fs::remove_file(&fx.source).unwrap();
        assert!(matches!(
            resource(&fx, false).current_state(&SystemFileSystemOps),
            LinkState::Incorrect { .. }
        ));
    }

    #[test]
    fn clear_occupant_removes_file() {
        let fx = fixture();
        let dest = fx.home.join(".vimrc");
        std::fs::write(&dest, "local").unwrap();
        assert!(resource(&fx, true).clear_occupant(&SystemFileSystemOps).unwrap());
        assert!(!dest.exists());
    }

    #[test]
    fn clear_occupant_removes_directory_recursively() {
        let fx = fixture();
        let dest = fx.home.join(".vimrc");
        std::fs::create_dir_all(dest.join("nested")).unwrap();
        std::fs::write(dest.join("nested").join("file"), "x").unwrap();
        assert!(resource(&fx, true).clear_occupant(&SystemFileSystemOps).unwrap());
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn clear_occupant_leaves_symlinks_alone() {
        let fx = fixture();
        let other = fx.home.join("other");
        std::fs::write(&other, "other").unwrap();
        let dest = fx.home.join(".vimrc");
        std::os::unix::fs::symlink(&other, &dest).unwrap();
        assert!(!resource(&fx, true).clear_occupant(&SystemFileSystemOps).unwrap());
        assert!(dest.is_symlink());
    }

    #[test]
    fn clear_occupant_noop_when_absent() {
        let fx = fixture();
        assert!(!resource(&fx, true).clear_occupant(&SystemFileSystemOps).unwrap());
    }

    #[test]
    fn clear_occupant_propagates_removal_error() {
        let mut fs = MockFileSystemOps::new();
        fs.expect_exists().return_const(true);
        fs.expect_is_symlink().return_const(false);
        fs.expect_is_dir().return_const(true);
        fs.expect_remove_dir_all()
            .times(1)
            .returning(|_| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        fs.expect_remove_file().never();

        let r = SymlinkResource::new(
            "~/.config",
            PathBuf::from("/home/u/.config"),
            PathBuf::from("/dots/config"),
            true,
        );
        let err = r.clear_occupant(&fs).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[cfg(unix)]
    #[test]
    fn apply_creates_link() {
        let fx = fixture();
        let r = resource(&fx, false);
        r.apply(&SystemFileSystemOps).unwrap();
        assert_eq!(std::fs::read_link(&r.destination).unwrap(), fx.source);
        assert_eq!(r.current_state(&SystemFileSystemOps), LinkState::Correct);
    }
}

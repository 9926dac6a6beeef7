//! Filesystem primitives used by link reconciliation.
//!
//! Every query and mutation the reconciler performs goes through
//! [`FileSystemOps`] so that failure paths (permission denied, removal
//! errors) can be exercised in unit tests without root tricks.  Production
//! code uses [`SystemFileSystemOps`].

use std::io;
use std::path::{Path, PathBuf};

/// Abstraction over the filesystem calls the reconciler makes.
///
/// None of these cache anything: each call observes the filesystem as it is
/// at that moment, including changes made earlier in the same run.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystemOps: Send + Sync {
    /// Returns `true` if `path` exists, following symlinks.
    ///
    /// A dangling symlink therefore reports `false`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` itself is a symlink (not followed).
    fn is_symlink(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory, following symlinks.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read the raw target of the symlink at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a symlink or cannot be read.
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Remove the file (or symlink) at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Recursively remove the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the tree cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a symlink at `link` pointing to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created (parent missing,
    /// permission denied, something already at `link`).
    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        create_symlink(target, link)
    }
}

/// Create a symlink (platform-specific).
#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Create a symlink (platform-specific).
///
/// Windows distinguishes file and directory symlinks, so the kind is taken
/// from the target.
#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

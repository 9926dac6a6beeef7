//! Home-directory lookup, `~` expansion, and platform-tolerant path comparison.
use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Return the user's home directory.
///
/// Reads `HOME`; on Windows `USERPROFILE` is tried first.
///
/// # Errors
///
/// Returns an error if neither variable is set.
pub fn home_dir() -> Result<PathBuf> {
    home_dir_from(|key: &str| std::env::var_os(key))
}

/// [`home_dir`] over an arbitrary variable lookup.
fn home_dir_from(var: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    let home = if cfg!(target_os = "windows") {
        var("USERPROFILE")
            .or_else(|| var("HOME"))
            .ok_or_else(|| anyhow::anyhow!("neither USERPROFILE nor HOME environment variable is set"))?
    } else {
        var("HOME").ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))?
    };
    Ok(PathBuf::from(home))
}

/// Expand a leading `~` in `path` to `home`.
///
/// Only the bare `~` and `~/…` forms are expanded; `~user` is left as is.
/// Trailing separators are dropped: `lstat` on `link/` follows the link, so
/// a destination must never be inspected in that form.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use dotlink_cli::paths::expand_home;
///
/// let home = Path::new("/home/user");
/// assert_eq!(expand_home("~/.vimrc", home), PathBuf::from("/home/user/.vimrc"));
/// assert_eq!(expand_home("~", home), PathBuf::from("/home/user"));
/// assert_eq!(expand_home("/etc/hosts", home), PathBuf::from("/etc/hosts"));
/// assert_eq!(expand_home("~/.config/nvim/", home), PathBuf::from("/home/user/.config/nvim"));
/// ```
#[must_use]
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    let expanded = if path == "~" {
        home.to_path_buf()
    } else {
        path.strip_prefix("~/")
            .or_else(|| path.strip_prefix("~\\"))
            .map_or_else(|| PathBuf::from(path), |rest| home.join(rest))
    };
    expanded.components().collect()
}

/// Compare two paths, normalising the `\\?\` prefix that Windows
/// `read_link` and `canonicalize` prepend to extended-length paths.
#[must_use]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    strip_win_prefix(a) == strip_win_prefix(b)
}

fn strip_win_prefix(p: &Path) -> PathBuf {
    let s = p.to_string_lossy();
    s.strip_prefix(r"\\?\")
        .map_or_else(|| p.to_path_buf(), PathBuf::from)
}

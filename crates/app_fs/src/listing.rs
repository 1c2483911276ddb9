//! Directory listing for the slideshow: which files count as images, and in what order

use crate::{FsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions accepted by the lister (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Where a session should start: the directory to list and, optionally, an item inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub directory: PathBuf,
    pub start_item: Option<String>,
}

/// Check if a path has a supported image extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let ext = e.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Dotfiles are hidden on every platform
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// List the images directly inside `dir`, sorted lexicographically by path.
///
/// Hidden entries, sub-directories and unsupported extensions are skipped.
/// Entries that cannot be inspected are skipped rather than failing the listing.
pub fn list_images<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        return Err(FsError::NotFound(dir.display().to_string()));
    }

    if !dir.is_dir() {
        return Err(FsError::InvalidPath(format!("Not a directory: {}", dir.display())));
    }

    let read_dir = fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => FsError::AccessDenied(dir.display().to_string()),
        _ => FsError::Io(e),
    })?;

    let mut paths = Vec::new();

    for entry in read_dir {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if is_hidden_name(&name) || is_hidden_attr(&path) {
            continue;
        }

        // Follows symlinks, so a link to an image counts as an image
        if !path.is_file() || !is_supported_image(&path) {
            continue;
        }

        paths.push(clean_path(&path.to_string_lossy()));
    }

    paths.sort();
    Ok(paths)
}

/// Resolve a command-line path into a directory to list plus an optional start item.
///
/// A directory is used as-is. A file means "show its directory, starting on this file".
pub fn resolve_launch_target<P: AsRef<Path>>(path: P) -> Result<LaunchTarget> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FsError::NotFound(path.display().to_string()));
    }

    let canonical = path.canonicalize()?;

    if canonical.is_dir() {
        return Ok(LaunchTarget {
            directory: PathBuf::from(clean_path(&canonical.to_string_lossy())),
            start_item: None,
        });
    }

    let directory = canonical
        .parent()
        .map(|p| PathBuf::from(clean_path(&p.to_string_lossy())))
        .ok_or_else(|| FsError::InvalidPath(format!("No parent directory: {}", path.display())))?;

    // Rebuild from the listing's point of view so the start item compares equal to listed paths
    let start_item = canonical
        .file_name()
        .map(|name| clean_path(&directory.join(name).to_string_lossy()));

    Ok(LaunchTarget { directory, start_item })
}

/// Strip Windows extended-length path prefix (`\\?\`) if present.
fn clean_path(s: &str) -> String {
    s.strip_prefix(r"\\?\").unwrap_or(s).to_string()
}

#[cfg(windows)]
fn is_hidden_attr(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    fs::metadata(path)
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn is_hidden_attr(_path: &Path) -> bool {
    false
}

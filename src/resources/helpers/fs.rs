//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// This is a shared helper for resource `apply()` methods that need to
/// create parent directories before writing a file or symlink.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove whatever entry currently exists at `path`.
///
/// Files and symlinks (broken ones included) are unlinked; directories are
/// removed recursively. Does nothing if `path` does not exist. This is the
/// unconditional-replacement step shared by the symlink and copy strategies.
///
/// # Errors
///
/// Returns an error if the entry exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_symlink() {
        #[cfg(windows)]
        {
            use std::os::windows::fs::MetadataExt;
            // Directory symlinks must be removed with `remove_dir` on Windows.
            // `symlink_metadata().is_dir()` is `false` for symlinks, so check
            // the raw FILE_ATTRIBUTE_DIRECTORY bit instead.
            if meta.file_attributes() & 0x10 != 0 {
                return std::fs::remove_dir(path)
                    .with_context(|| format!("remove symlink: {}", path.display()));
            }
        }
        std::fs::remove_file(path)
            .with_context(|| format!("remove symlink: {}", path.display()))?;
    } else if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove directory: {}", path.display()))?;
    } else {
        std::fs::remove_file(path).with_context(|| format!("remove file: {}", path.display()))?;
    }
    Ok(())
}

//! Symlink installation strategy (Linux/macOS).
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::helpers::fs as fs_helpers;
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// Installs a dotfile by symlinking the destination to the source.
///
/// Any pre-existing entry at the destination is replaced unconditionally:
/// files and symlinks are unlinked, directories are removed recursively. The
/// link always points at the fully resolved absolute source path, so it stays
/// valid no matter which working directory the installer ran from.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// Source file inside the repository.
    pub source: PathBuf,
    /// Destination path under the home directory.
    pub dest: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, dest: PathBuf) -> Self {
        Self { source, dest }
    }
}

impl Applicable for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.dest.display(), self.source.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        fs_helpers::ensure_parent_dir(&self.dest)?;
        fs_helpers::remove_existing(&self.dest)
            .with_context(|| format!("replace existing: {}", self.dest.display()))?;

        // Resolve the source so a relative invocation path cannot produce a
        // link that breaks when the working directory changes.
        let resolved = dunce::canonicalize(&self.source)
            .with_context(|| format!("resolve source: {}", self.source.display()))?;
        create_symlink(&resolved, &self.dest)
            .with_context(|| format!("create link: {}", self.dest.display()))?;

        Ok(ResourceChange::Applied)
    }
}

impl Resource for SymlinkResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }
        let resolved = dunce::canonicalize(&self.source)
            .with_context(|| format!("resolve source: {}", self.source.display()))?;

        std::fs::read_link(&self.dest).map_or_else(
            |_| {
                // Destination doesn't exist or isn't a symlink
                if self.dest.symlink_metadata().is_ok() {
                    Ok(ResourceState::Incorrect {
                        current: "destination is not a symlink".to_string(),
                    })
                } else {
                    Ok(ResourceState::Missing)
                }
            },
            |existing| {
                if existing == resolved {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Incorrect {
                        current: format!("points to {}", existing.display()),
                    })
                }
            },
        )
    }
}

/// Create a symlink at `link` pointing to `target` (platform-specific).
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(target, link)?;

    #[cfg(windows)]
    std::os::windows::fs::symlink_file(target, link)?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn description_names_both_paths() {
        let resource = SymlinkResource::new(PathBuf::from("/source"), PathBuf::from("/dest"));
        assert!(resource.description().contains("/source"));
        assert!(resource.description().contains("/dest"));
    }

    #[test]
    fn invalid_when_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let resource =
            SymlinkResource::new(dir.path().join("nonexistent"), dir.path().join("dest"));
        let state = resource.current_state().unwrap();
        assert!(matches!(state, ResourceState::Invalid { .. }));
    }

    #[test]
    fn missing_when_dest_not_exists() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        std::fs::write(&source, "test").unwrap();

        let resource = SymlinkResource::new(source, dir.path().join("dest"));
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
    }

    #[cfg(unix)]
    #[test]
    fn apply_creates_link_to_resolved_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bashrc");
        let dest = dir.path().join("home").join(".bashrc");
        std::fs::write(&source, "export PATH=/a\n").unwrap();

        let resource = SymlinkResource::new(source.clone(), dest.clone());
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);

        let link_target = std::fs::read_link(&dest).unwrap();
        assert_eq!(link_target, dunce::canonicalize(&source).unwrap());
        assert!(link_target.is_absolute());
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[cfg(unix)]
    #[test]
    fn apply_replaces_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let dest = dir.path().join("dest");
        std::fs::write(&source, "new").unwrap();
        std::fs::write(&dest, "old").unwrap();

        SymlinkResource::new(source, dest.clone()).apply().unwrap();
        assert!(std::fs::symlink_metadata(&dest).unwrap().is_symlink());
    }

    #[cfg(unix)]
    #[test]
    fn apply_replaces_directory_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let dest = dir.path().join("dest");
        std::fs::write(&source, "new").unwrap();
        std::fs::create_dir(&dest).unwrap();
        std::fs::write(dest.join("stale.txt"), "stale").unwrap();

        SymlinkResource::new(source, dest.clone()).apply().unwrap();
        assert!(std::fs::symlink_metadata(&dest).unwrap().is_symlink());
    }

    #[cfg(unix)]
    #[test]
    fn apply_replaces_wrong_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let other = dir.path().join("other");
        let dest = dir.path().join("dest");
        std::fs::write(&source, "source").unwrap();
        std::fs::write(&other, "other").unwrap();
        std::os::unix::fs::symlink(&other, &dest).unwrap();

        let resource = SymlinkResource::new(source, dest);
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
        resource.apply().unwrap();
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn incorrect_when_dest_is_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let dest = dir.path().join("dest");
        std::fs::write(&source, "content").unwrap();
        std::fs::write(&dest, "other content").unwrap();

        let resource = SymlinkResource::new(source, dest);
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
    }
}

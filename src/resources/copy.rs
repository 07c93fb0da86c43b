//! Copy installation strategy (Windows).
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::helpers::fs as fs_helpers;
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// Installs a dotfile by copying the source bytes to the destination.
///
/// Replacement semantics match [`super::symlink::SymlinkResource`]: whatever
/// currently exists at the destination is removed first (directories
/// recursively). Permission bits travel with the copy via [`std::fs::copy`];
/// timestamps are not preserved.
#[derive(Debug, Clone)]
pub struct CopyResource {
    /// Source file inside the repository.
    pub source: PathBuf,
    /// Destination path under the home directory.
    pub dest: PathBuf,
}

impl CopyResource {
    /// Create a new copy resource.
    #[must_use]
    pub const fn new(source: PathBuf, dest: PathBuf) -> Self {
        Self { source, dest }
    }
}

impl Applicable for CopyResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.dest.display(), self.source.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        fs_helpers::ensure_parent_dir(&self.dest)?;
        fs_helpers::remove_existing(&self.dest)
            .with_context(|| format!("replace existing: {}", self.dest.display()))?;

        std::fs::copy(&self.source, &self.dest).with_context(|| {
            format!(
                "copy {} to {}",
                self.source.display(),
                self.dest.display()
            )
        })?;

        Ok(ResourceChange::Applied)
    }
}

impl Resource for CopyResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }
        if self.dest.symlink_metadata().is_err() {
            return Ok(ResourceState::Missing);
        }
        if !self.dest.is_file() {
            return Ok(ResourceState::Incorrect {
                current: "destination is not a regular file".to_string(),
            });
        }

        let source_bytes = std::fs::read(&self.source)
            .with_context(|| format!("read source: {}", self.source.display()))?;
        let dest_bytes = std::fs::read(&self.dest)
            .with_context(|| format!("read destination: {}", self.dest.display()))?;
        if source_bytes == dest_bytes {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: "content differs".to_string(),
            })
        }
    }
}

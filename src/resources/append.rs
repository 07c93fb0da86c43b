//! Idempotent append merge for marker files.
//!
//! Source files whose first line is the append marker are merged into the
//! destination instead of replacing it: the marker line is dropped, blank
//! lines are ignored, and only lines not already present verbatim in the
//! destination are appended, in source order. Running the merge a second
//! time with the same inputs never changes the destination again.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::helpers::fs as fs_helpers;
use super::{Applicable, ResourceChange};

/// Merges the body of an append-marker source file into the destination.
///
/// Implements only [`Applicable`]: whether anything needs to change is only
/// known once both files have been read, so the work and the check are one
/// pass.
#[derive(Debug, Clone)]
pub struct AppendResource {
    /// Source file inside the repository (first line is the marker).
    pub source: PathBuf,
    /// Destination path under the home directory.
    pub dest: PathBuf,
}

impl AppendResource {
    /// Create a new append resource.
    #[must_use]
    pub const fn new(source: PathBuf, dest: PathBuf) -> Self {
        Self { source, dest }
    }
}

impl Applicable for AppendResource {
    fn description(&self) -> String {
        format!("{} >> {}", self.source.display(), self.dest.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let text = std::fs::read_to_string(&self.source)
            .with_context(|| format!("read source: {}", self.source.display()))?;
        // The marker line itself is never merged.
        let body = strip_first_line(&text);

        let source_lines: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
        if source_lines.is_empty() {
            return Ok(ResourceChange::Skipped {
                reason: "nothing to append".to_string(),
            });
        }

        let existing = if self.dest.exists() {
            std::fs::read_to_string(&self.dest)
                .with_context(|| format!("read destination: {}", self.dest.display()))?
        } else {
            String::new()
        };
        // Membership is tested against exact lines, no normalization.
        let existing_lines: HashSet<&str> = existing.lines().collect();

        let new_lines: Vec<&str> = source_lines
            .iter()
            .copied()
            .filter(|line| !existing_lines.contains(line))
            .collect();
        if new_lines.is_empty() {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        fs_helpers::ensure_parent_dir(&self.dest)?;
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.dest)
            .with_context(|| format!("open for append: {}", self.dest.display()))?;

        // Bridge onto a complete line when the destination is non-empty and
        // does not already end in a newline.
        if !existing.is_empty() && !existing.ends_with('\n') {
            file.write_all(b"\n")
                .with_context(|| format!("write: {}", self.dest.display()))?;
        }
        file.write_all(new_lines.join("\n").as_bytes())
            .with_context(|| format!("write: {}", self.dest.display()))?;
        // Final newline only if the post-marker source block had one.
        if body.ends_with('\n') {
            file.write_all(b"\n")
                .with_context(|| format!("write: {}", self.dest.display()))?;
        }

        Ok(ResourceChange::Applied)
    }
}

/// Everything after the first line of `text`. Empty when there is no second
/// line.
fn strip_first_line(text: &str) -> &str {
    text.split_once('\n').map_or("", |(_, rest)| rest)
}

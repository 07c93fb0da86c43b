//! Installation primitives (check + apply pattern).
pub mod append;
pub mod copy;
pub mod helpers;
pub mod symlink;

use anyhow::Result;

/// Minimal interface for installation primitives that can be described and
/// applied.
///
/// Strategies whose outcome is only known by performing the work (e.g. the
/// append merge) implement only this trait. Strategies that can determine
/// their own state independently implement the richer [`Resource`]
/// super-trait as well.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// This method should:
    /// - Create parent directories if needed
    /// - Update the destination to match the desired state
    /// - Return the appropriate `ResourceChange` result
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, invalid paths, or other system errors. Errors are
    /// fatal for the run; the driver never retries.
    fn apply(&self) -> Result<ResourceChange>;
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use dotfiles_install::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
/// let skipped = ResourceChange::Skipped { reason: "nothing to append".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Destination was created or updated.
    Applied,
    /// Destination was already correct (no change needed).
    AlreadyCorrect,
    /// Nothing to do (e.g. an append source with an empty body).
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

/// State of a destination entry relative to its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Destination does not exist.
    Missing,
    /// Destination exists and matches the desired state.
    Correct,
    /// Destination exists but does not match the desired state.
    Incorrect {
        /// The current value of the destination.
        current: String,
    },
    /// Resource cannot be applied (e.g. the source file is gone).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Interface for installation primitives that can be checked before or after
/// application.
pub trait Resource: Applicable {
    /// Check the current state of the destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined due to I/O failures,
    /// permission issues, or other system errors.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if the destination needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::current_state`].
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

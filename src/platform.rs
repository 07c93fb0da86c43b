use std::fmt;

use crate::error::PlatformError;

/// Detected operating system platform.
///
/// Determined once per run and threaded explicitly through the driver; it
/// selects both the source subdirectory ([`Os::dir_name`]) and the
/// installation strategy ([`Os::uses_symlinks`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl Os {
    /// Detect the current platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] on any host other than Linux,
    /// macOS, or Windows. This is fatal and must abort the run before any
    /// filesystem mutation.
    pub fn detect() -> Result<Self, PlatformError> {
        if cfg!(target_os = "linux") {
            Ok(Self::Linux)
        } else if cfg!(target_os = "macos") {
            Ok(Self::MacOs)
        } else if cfg!(target_os = "windows") {
            Ok(Self::Windows)
        } else {
            Err(PlatformError::Unsupported {
                platform: std::env::consts::OS.to_string(),
            })
        }
    }

    /// Name of the platform's source subdirectory in the repository.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        }
    }

    /// Whether non-append files are installed as symlinks (Linux/macOS)
    /// rather than byte copies (Windows).
    #[must_use]
    pub const fn uses_symlinks(self) -> bool {
        !matches!(self, Self::Windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_returns_supported_platform() {
        // The three supported targets are the only ones we build for.
        let os = Os::detect().unwrap();
        assert!(matches!(os, Os::Linux | Os::MacOs | Os::Windows));
    }

    #[test]
    fn dir_names_are_lowercase_tokens() {
        assert_eq!(Os::Linux.dir_name(), "linux");
        assert_eq!(Os::MacOs.dir_name(), "macos");
        assert_eq!(Os::Windows.dir_name(), "windows");
    }

    #[test]
    fn display_matches_dir_name() {
        assert_eq!(Os::Linux.to_string(), "linux");
        assert_eq!(Os::MacOs.to_string(), "macos");
        assert_eq!(Os::Windows.to_string(), "windows");
    }

    #[test]
    fn symlink_strategy_per_platform() {
        assert!(Os::Linux.uses_symlinks());
        assert!(Os::MacOs.uses_symlinks());
        assert!(!Os::Windows.uses_symlinks());
    }
}

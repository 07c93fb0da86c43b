//! Domain-specific error types for the dotfiles installer.
//!
//! Modules return typed errors ([`PlatformError`], [`FileError`]) which the
//! driver converts to [`anyhow::Error`] via the standard `?` operator. Every
//! error is fatal: nothing is caught and retried, and the first failure
//! aborts the remainder of the run.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal pre-flight platform errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The host is not one of the supported platforms.
    #[error("unsupported operating system: {platform}")]
    Unsupported {
        /// Host platform identifier (e.g. `"freebsd"`).
        platform: String,
    },
}

/// File access failures during classification, merging, linking, or copying.
#[derive(Error, Debug)]
pub enum FileError {
    /// An I/O error occurred while reading or writing a file.
    #[error("cannot access {path}: {source}")]
    Io {
        /// Path of the file that could not be accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl FileError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn platform_error_unsupported_display() {
        let e = PlatformError::Unsupported {
            platform: "freebsd".to_string(),
        };
        assert_eq!(e.to_string(), "unsupported operating system: freebsd");
    }

    #[test]
    fn file_error_io_display() {
        let e = FileError::io(
            "/home/user/.bashrc",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(e.to_string().contains("/home/user/.bashrc"));
        assert!(e.to_string().contains("permission denied"));
    }

    #[test]
    fn file_error_io_has_source() {
        use std::error::Error as StdError;
        let e = FileError::io(
            "/tmp/x",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(e.source().is_some());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_types_are_send_sync() {
        assert_send_sync::<PlatformError>();
        assert_send_sync::<FileError>();
    }

    #[test]
    fn errors_convert_to_anyhow() {
        let _p: anyhow::Error = PlatformError::Unsupported {
            platform: "plan9".to_string(),
        }
        .into();
        let _f: anyhow::Error =
            FileError::io("/tmp/x", io::Error::other("boom")).into();
    }
}

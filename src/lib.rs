//! Cross-platform dotfiles installer.
//!
//! Installs the files under the repository's platform directory (`linux/`,
//! `macos/`, or `windows/`) into the user's home directory, preserving
//! relative paths. Strategy is decided per platform and per file:
//!
//! - ordinary files are **symlinked** on Linux/macOS and **copied** on
//!   Windows, replacing whatever already exists at the destination;
//! - files whose first line is the `>>> APPEND <<<` marker are **merged**
//!   into the destination with line-level deduplication instead.
//!
//! Layering: [`platform`] and [`marker`] make the two per-run/per-file
//! decisions, [`resources`] holds the installation primitives, and
//! [`commands`] orchestrates detection, confirmation, traversal, and
//! dispatch.
pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod marker;
pub mod platform;
pub mod resources;

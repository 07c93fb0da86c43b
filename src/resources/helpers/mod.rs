//! Shared helpers for resource `apply()` implementations.
pub mod fs;

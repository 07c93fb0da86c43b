//! Append-mode classification.
//!
//! A source file opts into append mode by making its first line consist
//! solely of the marker token `>>> APPEND <<<`, in any case and with any
//! whitespace. The marker line is stripped during merging and never reaches
//! the destination.

use std::fs::File;
use std::io::{BufRead as _, BufReader};
use std::path::Path;

use crate::error::FileError;

/// Normalized form of the append marker line.
pub const APPEND_MARKER: &str = ">>>append<<<";

/// Normal form used for marker comparison: all whitespace removed, lowercased.
fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<String>().to_lowercase()
}

/// Check whether `path` is an append-mode source file.
///
/// Reads only the first line. The line is read as raw bytes and converted
/// lossily, so binary files classify as non-append instead of failing on
/// invalid UTF-8.
///
/// # Errors
///
/// Returns [`FileError::Io`] if the file cannot be opened or read.
pub fn is_append_source(path: &Path) -> Result<bool, FileError> {
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut first_line = Vec::new();
    reader
        .read_until(b'\n', &mut first_line)
        .map_err(|e| FileError::io(path, e))?;
    Ok(normalize(&String::from_utf8_lossy(&first_line)) == APPEND_MARKER)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn file_with(content: &[u8]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f"), content).unwrap();
        dir
    }

    #[test]
    fn canonical_marker_matches() {
        let dir = file_with(b">>> APPEND <<<\nexport PATH=/a\n");
        assert!(is_append_source(&dir.path().join("f")).unwrap());
    }

    #[test]
    fn case_and_whitespace_variants_match() {
        for marker in [">>>append<<<", "  >>> ApPeNd <<<  ", ">>>\tAPPEND\t<<<"] {
            let dir = file_with(format!("{marker}\nbody\n").as_bytes());
            assert!(
                is_append_source(&dir.path().join("f")).unwrap(),
                "expected marker: {marker:?}"
            );
        }
    }

    #[test]
    fn surrounding_text_is_not_a_marker() {
        // The normalized first line must equal the token, not merely contain it.
        let dir = file_with(b"# >>> APPEND <<<\nbody\n");
        assert!(!is_append_source(&dir.path().join("f")).unwrap());
    }

    #[test]
    fn ordinary_file_is_not_append() {
        let dir = file_with(b"export PATH=/a\n");
        assert!(!is_append_source(&dir.path().join("f")).unwrap());
    }

    #[test]
    fn empty_file_is_not_append() {
        let dir = file_with(b"");
        assert!(!is_append_source(&dir.path().join("f")).unwrap());
    }

    #[test]
    fn marker_on_second_line_is_ignored() {
        let dir = file_with(b"first\n>>> APPEND <<<\n");
        assert!(!is_append_source(&dir.path().join("f")).unwrap());
    }

    #[test]
    fn marker_without_trailing_newline_matches() {
        let dir = file_with(b">>> APPEND <<<");
        assert!(is_append_source(&dir.path().join("f")).unwrap());
    }

    #[test]
    fn binary_file_is_not_append() {
        let dir = file_with(&[0xff, 0xfe, 0x00, 0x01, b'\n', 0x02]);
        assert!(!is_append_source(&dir.path().join("f")).unwrap());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = is_append_source(&dir.path().join("absent")).unwrap_err();
        assert!(err.to_string().contains("absent"));
    }
}

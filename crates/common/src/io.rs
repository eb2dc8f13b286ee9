//! Output-file handling shared by the evaluator and minimizer binaries.

use std::io;
use std::path::Path;
use std::{fs, io::Write};

/// Write `contents` to `path` in a single operation, creating missing parent
/// directories first.
///
/// Callers render their full output before calling this, so a failed
/// evaluation never leaves a partially written result file behind.
pub fn write_output(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_exact_bytes_without_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output(&path, "1, a\n2, b").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1, a\n2, b");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("out.txt");
        write_output(&path, "").unwrap();
        assert!(path.exists());
    }
}

//! Temporary directory helpers for tests that touch the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

/// Creates a temporary directory for test output.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Writes `contents` to `dir/name`, creating parent directories.
pub fn write_test_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create test file directory");
    }
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Creates an empty file at `root/<rel>` (e.g. a placeholder swath).
pub fn touch(root: &Path, rel: &str) -> PathBuf {
    write_test_file(root, rel, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_test_file_creates_parents() {
        let dir = temp_test_dir();
        let path = touch(dir.path(), "aqua/2019/123/A2019123174500.L2");
        assert!(path.is_file());
    }
}

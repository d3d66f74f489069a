// Scanner utilities
//
// Common helpers shared by discovery and the scanner.

use std::path::Path;

/// File utilities
pub mod file_utils {
    use super::*;
    use anyhow::{Context, Result};
    use std::fs;

    /// Check if a file has one of the given extensions (case-insensitive, without the dot)
    pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// Read a file's raw bytes
    pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Storage key conversion (absolute path → base-relative `/`-separated name)
pub mod paths;

/// Excluded-substring matching
pub mod ignore;

#[cfg(test)]
mod tests {
    use super::file_utils::*;
    use std::path::Path;

    #[test]
    fn test_has_extension() {
        let php = vec!["php".to_string()];
        assert!(has_extension(Path::new("/src/A.php"), &php));
        assert!(has_extension(Path::new("/src/B.PHP"), &php));
        assert!(!has_extension(Path::new("/src/C.phtml"), &php));
        assert!(!has_extension(Path::new("/src/Makefile"), &php));
    }

    #[test]
    fn test_read_missing_file_names_the_path() {
        let err = read_file_bytes(Path::new("/definitely/not/here.php")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.php"));
    }
}

//! Exclusion matching for discovered files
//!
//! Exclusions are literal substrings: a path is skipped when any excluded
//! entry occurs anywhere in its string form. No glob or word-boundary rules
//! apply, so `vendor` also excludes `/src/vendored/x.php`.

use std::path::Path;

/// Check if a path contains any of the excluded substrings
pub fn is_excluded(path: &Path, excluded: &[String]) -> bool {
    if excluded.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();
    excluded
        .iter()
        .filter(|entry| !entry.is_empty())
        .any(|entry| path_str.contains(entry.as_str()))
}

//! Source file discovery
//!
//! Produces the ordered list of files a scan will process. The list is built
//! up front and sorted, so two scans of the same tree visit files in the same
//! order.

use crate::utils::file_utils::has_extension;
use crate::utils::ignore::is_excluded;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Absolute paths of every file under `root` with one of `extensions`, minus exclusions
///
/// A `root` that is itself a matching file is returned on its own. Unreadable
/// entries are logged and skipped.
pub fn discover_files(
    root: &Path,
    excluded: &[String],
    extensions: &[String],
) -> io::Result<Vec<PathBuf>> {
    let root = root.canonicalize()?;

    if root.is_file() {
        if has_extension(&root, extensions) && !is_excluded(&root, excluded) {
            return Ok(vec![root]);
        }
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }

        let path = entry
            .path()
            .canonicalize()
            .unwrap_or_else(|_| entry.path().to_path_buf());
        if is_excluded(&path, excluded) {
            debug!("Excluded: {}", path.display());
            continue;
        }
        files.push(path);
    }

    Ok(files)
}

// Storage key conversion
//
// Documents are keyed by their path relative to a configured base directory,
// always written with `/` separators so keys are stable across platforms.

use std::path::Path;

/// Storage key for `path`
///
/// `base_directory` is stripped as a plain string prefix; a path that does not
/// start with it is kept whole. One leading `/` left over after stripping is
/// dropped so `/srv/app` and `/srv/app/` produce the same keys.
pub fn relative_file_name(path: &Path, base_directory: &str) -> String {
    let path_str = to_unix_style(&path.to_string_lossy());
    let base = to_unix_style(base_directory);

    if base.is_empty() {
        return path_str;
    }

    match path_str.strip_prefix(base.as_str()) {
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest).to_string(),
        None => path_str,
    }
}

fn to_unix_style(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '\\' {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

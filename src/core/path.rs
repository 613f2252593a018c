use crate::core::TranspackResult;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// List every file under `entry_dir`, recursively.
///
/// `entry_dir` is resolved against `root` (the working directory). Paths
/// come back relative to `root` and still carrying the `entry_dir` prefix,
/// `/`-separated and sorted, so the derived entry mapping is stable across
/// platforms and filesystems.
pub fn discover_files(root: &Path, entry_dir: &str) -> TranspackResult<Vec<String>> {
    let walk_root = root.join(entry_dir);
    let mut files = Vec::new();

    for entry in WalkDir::new(&walk_root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.push(slash_path(path));
        }
    }

    files.sort();
    Ok(files)
}

/// Resolve `path` against `cwd`, leaving absolute paths alone.
pub fn resolve_against(cwd: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&cwd.join(path))
    }
}

/// Normalize a path for cross-platform compatibility
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components().collect()
}

/// Render a path with `/` separators, the form webpack configs expect.
pub fn slash_path(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .map(|component| match component {
            Component::CurDir => ".".to_string(),
            Component::ParentDir => "..".to_string(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect();

    if path.has_root() {
        format!("/{}", parts.join("/").trim_start_matches('/'))
    } else {
        parts.join("/")
    }
}

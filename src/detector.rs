use std::path::{Path, PathBuf};

/// Find every file under `root` accepted by `accepts`.
///
/// Directories named in `exclude_dirs` are not descended into. Results are
/// sorted so repeated scans see files in the same order. A `root` that is a
/// file is returned on its own if accepted. Symlinked files are followed;
/// symlinked directories are not, so link cycles cannot loop the walk.
pub fn find_lock_files<F>(root: &Path, exclude_dirs: &[String], accepts: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let mut found = Vec::new();

    if root.is_file() {
        if accepts(root) {
            found.push(root.to_path_buf());
        }
        return found;
    }

    walk(root, exclude_dirs, &accepts, &mut found);
    found.sort();
    found
}

fn walk<F>(dir: &Path, exclude_dirs: &[String], accepts: &F, found: &mut Vec<PathBuf>)
where
    F: Fn(&Path) -> bool,
{
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Unable to list {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            let excluded = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| exclude_dirs.iter().any(|d| d == n));
            if !excluded {
                walk(&path, exclude_dirs, accepts, found);
            }
        } else if accepts(&path) {
            // `is_file` follows the link for symlinked lock files.
            if path.is_file() {
                found.push(path);
            } else if file_type.is_symlink() {
                tracing::debug!("Skipping {}: link does not point to a file", path.display());
            }
        }
    }
}

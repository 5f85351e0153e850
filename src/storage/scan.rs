//! Discovery of pending `.fit` files in the import directory.

use std::path::{Path, PathBuf};

/// List `.fit` files directly inside the import directory, sorted by
/// path for deterministic runs.
///
/// A missing or unreadable directory is an empty batch, not an error;
/// unreadable entries are skipped.
pub fn pending_fit_files(import_dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(import_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Import directory {:?} not readable: {}", import_dir, e);
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        let is_fit = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("fit"))
            .unwrap_or(false);

        if is_fit && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    files
}

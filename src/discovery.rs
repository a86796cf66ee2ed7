// src/discovery.rs
//! Filesystem discovery of PHP sources.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively collects `.php` files under `root`, sorted for deterministic
/// sweeps. Unreadable entries are counted and reported to stderr; they never
/// abort the walk.
#[must_use]
pub fn discover_php_files(root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut errors = 0usize;

    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(e) if e.file_type().is_file() && is_php_file(e.path()) => {
                paths.push(e.into_path());
            }
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }

    if errors > 0 {
        eprintln!("WARN: {errors} entries could not be read during the walk");
    }

    paths.sort();
    paths
}

fn is_php_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".php"))
        .unwrap_or(false)
}

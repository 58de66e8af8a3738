//! Runtime icon lookup.
//!
//! The packaged application looks for its window icon next to the executable
//! and in the working directory.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Directories searched for the icon, in order, without duplicates.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    match std::env::current_exe() {
        Ok(exe) => {
            let exe = exe.canonicalize().unwrap_or(exe);
            if let Some(parent) = exe.parent() {
                dirs.push(parent.to_path_buf());
            }
        }
        Err(e) => warn!(error = %e, "Could not determine executable path"),
    }

    match std::env::current_dir() {
        Ok(cwd) => dirs.push(cwd),
        Err(e) => warn!(error = %e, "Could not determine working directory"),
    }

    dedup_keep_order(dirs)
}

fn dedup_keep_order(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut unique: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if !unique.contains(&dir) {
            unique.push(dir);
        }
    }
    unique
}

/// First existing `dir/name`, directories outermost.
pub fn locate_icon<S: AsRef<str>>(dirs: &[impl AsRef<Path>], names: &[S]) -> Option<PathBuf> {
    for dir in dirs {
        for name in names {
            let candidate = dir.as_ref().join(name.as_ref());
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Found icon");
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "locate_test.rs"]
mod tests;

//! Source image resolution.
//!
//! Picks the image the icon is generated from inside a project root:
//! an explicit `.ico`, then the named PNG, then the newest PNG/JPEG that is
//! not itself a generated icon.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::SourceConfig;

/// Extensions eligible for the newest-image fallback.
const FALLBACK_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Why a source was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Given on the command line.
    Explicit,
    /// One of the configured `.ico` names.
    NamedIco,
    /// The configured PNG name.
    NamedPng,
    /// Most recently modified image in the root.
    Newest,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceKind::Explicit => "explicit path",
            SourceKind::NamedIco => "named .ico",
            SourceKind::NamedPng => "named .png",
            SourceKind::Newest => "newest image",
        };
        f.write_str(label)
    }
}

/// A resolved source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChoice {
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// Whether `file_name` is an icon this tool produced.
pub fn is_generated(file_name: &str, config: &SourceConfig, output_name: &str) -> bool {
    let marked = !config.generated_marker.is_empty() && file_name.contains(&config.generated_marker);
    marked || file_name == output_name
}

fn has_fallback_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FALLBACK_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

fn named_candidate(root: &Path, name: &str, config: &SourceConfig, output_name: &str) -> Option<PathBuf> {
    if name.is_empty() || is_generated(name, config, output_name) {
        return None;
    }
    let path = root.join(name);
    path.is_file().then_some(path)
}

/// Newest eligible image directly inside `root`; ties go to the smaller file name.
fn newest_image(root: &Path, config: &SourceConfig, output_name: &str) -> Result<Option<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to list project root: {}", root.display()))?;

    let mut best: Option<(SystemTime, String, PathBuf)> = None;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", root.display()))?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if !has_fallback_extension(&path) || is_generated(&name, config, output_name) {
            continue;
        }
        let metadata = entry
            .metadata()
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to read modification time: {}", path.display()))?;

        let newer = match &best {
            None => true,
            Some((best_time, best_name, _)) => {
                modified > *best_time || (modified == *best_time && name < *best_name)
            }
        };
        if newer {
            best = Some((modified, name, path));
        }
    }

    Ok(best.map(|(_, _, path)| path))
}

/// Resolve the source image inside `root`.
///
/// Returns `Ok(None)` when the root holds no eligible image.
pub fn resolve_source(
    root: &Path,
    config: &SourceConfig,
    output_name: &str,
) -> Result<Option<SourceChoice>> {
    for name in &config.ico_names {
        if let Some(path) = named_candidate(root, name, config, output_name) {
            debug!(path = %path.display(), "Using named .ico source");
            return Ok(Some(SourceChoice {
                path,
                kind: SourceKind::NamedIco,
            }));
        }
    }

    if let Some(path) = named_candidate(root, &config.png_name, config, output_name) {
        debug!(path = %path.display(), "Using named .png source");
        return Ok(Some(SourceChoice {
            path,
            kind: SourceKind::NamedPng,
        }));
    }

    let newest = newest_image(root, config, output_name)?;
    if let Some(path) = &newest {
        debug!(path = %path.display(), "Using newest image as source");
    }
    Ok(newest.map(|path| SourceChoice {
        path,
        kind: SourceKind::Newest,
    }))
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;

//! The packaging step: resolve a source, normalize it, write the icon.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::normalize::{self, Rect};
use crate::source::{self, SourceChoice, SourceKind};

/// Inputs for one preparation run.
#[derive(Debug, Clone, Default)]
pub struct PrepareRequest {
    /// Project root holding the candidate images.
    pub root: PathBuf,
    /// Source image that bypasses resolution.
    pub source: Option<PathBuf>,
    /// Destination that overrides `output.file_name` under the root.
    pub output: Option<PathBuf>,
}

/// What a preparation run produced.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub source: SourceChoice,
    pub output: PathBuf,
    pub subject: Rect,
    pub canvas_side: u32,
}

impl PrepareRequest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Destination path for this request.
    pub fn output_path(&self, config: &Config) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.root.join(&config.output.file_name))
    }
}

/// Run the whole preparation step.
pub fn prepare(request: &PrepareRequest, config: &Config) -> Result<Prepared> {
    config.validate().context("Invalid icon configuration")?;

    let source = match &request.source {
        Some(path) => SourceChoice {
            path: path.clone(),
            kind: SourceKind::Explicit,
        },
        None => source::resolve_source(&request.root, &config.source, &config.output.file_name)?
            .with_context(|| {
                format!(
                    "No icon source found in {} (looked for {:?}, {}, or any .png/.jpg/.jpeg)",
                    request.root.display(),
                    config.source.ico_names,
                    config.source.png_name
                )
            })?,
    };

    let output = request.output_path(config);
    info!(
        source = %source.path.display(),
        kind = %source.kind,
        output = %output.display(),
        "Preparing application icon"
    );

    let normalized = normalize::normalize_file(&source.path, &output, &config.icon)?;

    Ok(Prepared {
        source,
        output,
        subject: normalized.subject,
        canvas_side: normalized.canvas_side,
    })
}

//! Error types for icon normalization.

use std::path::PathBuf;

/// Result type alias for icon operations.
pub type Result<T> = std::result::Result<T, IconError>;

/// Errors that can occur while reading, normalizing or writing an icon.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The source file could not be opened or read.
    #[error("Failed to read source image '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source bytes are not an image the decoder understands.
    #[error("Failed to decode source image '{}': {source}", .path.display())]
    Undecodable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The destination could not be created, written or moved into place.
    #[error("Failed to write icon '{}': {source}", .path.display())]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The icon encoder rejected an entry.
    #[error("Failed to encode icon entry: {0}")]
    Encode(#[source] std::io::Error),

    /// An existing icon container could not be parsed.
    #[error("Invalid icon file '{}': {source}", .path.display())]
    InvalidIcon {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IconError {
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    pub fn undecodable(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Undecodable {
            path: path.into(),
            source,
        }
    }

    pub fn unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unwritable {
            path: path.into(),
            source,
        }
    }
}

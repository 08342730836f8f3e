//! Error types for the gallery.
//!
//! Errors travel inside iced messages, so every variant holds plain data
//! and the whole enum is `Clone`.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GalleryError {
    /// The chosen folder could not be listed.
    #[error("cannot read folder {}: {}", .path.display(), .message)]
    Folder { path: PathBuf, message: String },

    /// An image file could not be opened.
    #[error("cannot open {}: {}", .path.display(), .message)]
    Io { path: PathBuf, message: String },

    /// An image file was read but could not be decoded.
    #[error("cannot decode {}: {}", .path.display(), .message)]
    Decode { path: PathBuf, message: String },

    /// A background decode task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),

    /// The settings file could not be read or written.
    #[error("settings error: {0}")]
    Settings(String),
}

impl GalleryError {
    /// Classify an `image` crate error for the file at `path`.
    pub fn from_image(path: &Path, err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => GalleryError::Io {
                path: path.to_path_buf(),
                message: io.to_string(),
            },
            other => GalleryError::Decode {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    }
}

pub type GalleryResult<T> = Result<T, GalleryError>;

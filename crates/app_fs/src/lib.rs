//! Fade File System Layer
//!
//! Provides:
//! - Image discovery for a slideshow directory (supported extensions, hidden entries)
//! - Launch path resolution (directory, or a single image inside one)

mod listing;

pub use listing::{
    is_hidden_name, is_supported_image, list_images, resolve_launch_target, LaunchTarget,
    IMAGE_EXTENSIONS,
};

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, FsError>;

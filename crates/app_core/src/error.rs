//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (skip, no-op, or transient notice) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Tag store error: {0}")]
    TagStore(String),

    // ===== Fatal Errors (session cannot start) =====
    #[error("No images found in {0}")]
    EmptyPlaylist(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::ImageDecode(_) | AppError::TagStore(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::ImageDecode(msg) => format!("Cannot load image: {}", msg),
            AppError::EmptyPlaylist(dir) => format!("No images found in {}", dir),
            AppError::PathNotFound(path) => format!("Path does not exist: {}", path),
            _ => self.to_string(),
        }
    }
}

impl From<app_fs::FsError> for AppError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::NotFound(p) => AppError::PathNotFound(p),
            app_fs::FsError::InvalidPath(p) => AppError::NotADirectory(p),
            app_fs::FsError::Io(e) => AppError::Io(e),
            app_fs::FsError::AccessDenied(p) => AppError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                p,
            )),
        }
    }
}

impl From<app_db::DbError> for AppError {
    fn from(e: app_db::DbError) -> Self {
        AppError::TagStore(e.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::ImageDecode(e.to_string())
    }
}

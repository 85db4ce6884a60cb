//! Error types for document model operations

use crate::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Path not found: {0}")]
    PathNotFound(Path),

    #[error("Node at {0} is not an element")]
    NotAnElement(Path),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;

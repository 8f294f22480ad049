//! Error types for sceneviz

use thiserror::Error;

/// Main error type for sceneviz operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No frame contributed any geometry to the extent")]
    EmptySequence,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias for sceneviz operations
pub type Result<T> = std::result::Result<T, Error>;

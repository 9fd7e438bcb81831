//! Error types for export.

use thiserror::Error;

/// Errors that abort an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error writing the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The serializer could not encode the solid.
    #[error("{format} serialization failed: {message}")]
    Serialize {
        /// Format name, e.g. `"STL"`.
        format: &'static str,
        /// Error message.
        message: String,
    },

    /// The requested format name is not known.
    #[error("unknown export format: {0:?} (expected stl, step or dxf)")]
    UnknownFormat(String),
}

impl ExportError {
    /// Create a serialization error.
    pub fn serialize(format: &'static str, message: impl Into<String>) -> Self {
        Self::Serialize {
            format,
            message: message.into(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

//! Error types for loading point datasets.

use std::fmt;
use thiserror::Error;

/// Which schema rule a payload violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// The payload is not a JSON array.
    NotAnArray,
    /// An element has no `id`, or it is not a non-empty string.
    InvalidId,
    /// An element's `x`, `y` or `z` is missing or not a number.
    InvalidCoordinates,
    /// Two elements share an `id`.
    DuplicateId,
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NotAnArray => "not an array",
            Self::InvalidId => "missing/invalid id",
            Self::InvalidCoordinates => "invalid coordinates",
            Self::DuplicateId => "duplicate id",
        };
        f.write_str(reason)
    }
}

/// A payload shape or content violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema error: {kind}{}", .point_id.as_ref().map(|id| format!(" (point {id:?})")).unwrap_or_default())]
pub struct SchemaError {
    /// The violated rule.
    pub kind: SchemaErrorKind,
    /// The offending point id, when one is known.
    pub point_id: Option<String>,
}

impl SchemaError {
    /// Create an error without a point id.
    pub fn new(kind: SchemaErrorKind) -> Self {
        Self {
            kind,
            point_id: None,
        }
    }

    /// Create an error naming the offending point.
    pub fn for_point(kind: SchemaErrorKind, point_id: impl Into<String>) -> Self {
        Self {
            kind,
            point_id: Some(point_id.into()),
        }
    }
}

/// Errors that abort loading a point dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The fetch failed or returned a non-success status.
    #[error("transport error fetching {source_name}{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Transport {
        /// The URL or path that was requested.
        source_name: String,
        /// HTTP status code, absent for network or I/O failures.
        status: Option<u16>,
        /// Human-readable description.
        message: String,
    },

    /// The payload is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload is JSON but violates the point schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl LoadError {
    /// Create a transport error.
    pub fn transport(
        source_name: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::Transport {
            source_name: source_name.into(),
            status,
            message: message.into(),
        }
    }

    /// The schema error, if this is one.
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

//! Error types for mesh I/O operations.

use std::path::PathBuf;

use mesh_types::ErrorCategory;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid file content that is not tied to a particular line.
    #[error("invalid STL content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// A line of an ASCII STL could not be parsed.
    #[error("invalid ASCII STL at line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// Binary STL declares more triangles than the file holds.
    #[error(
        "truncated binary STL: header declares {declared} triangles but only {available} are present"
    )]
    Truncated {
        /// Triangle count from the header.
        declared: u32,
        /// Complete triangle records actually present.
        available: u64,
    },

    /// The surface has no vertices, so it has no bounding box.
    #[error("STL contains no triangles")]
    EmptyMesh,

    /// More facets than the binary triangle count field can hold.
    #[error("cannot write {count} facets to binary STL (limit is u32::MAX)")]
    TooManyFacets {
        /// Number of facets requested.
        count: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("ASCII STL is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Create a `Parse` error for a one-based line number.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Map the error onto the shared taxonomy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } => ErrorCategory::MissingInput,
            Self::InvalidContent { .. }
            | Self::Parse { .. }
            | Self::Truncated { .. }
            | Self::EmptyMesh
            | Self::Utf8(_) => ErrorCategory::Format,
            Self::TooManyFacets { .. } => ErrorCategory::Usage,
            Self::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Open-time helper: map `NotFound` onto [`IoError::FileNotFound`].
pub(crate) fn read_input(path: &std::path::Path) -> IoResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })
}

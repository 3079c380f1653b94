//! Error types for FFD file I/O.

use std::path::{Path, PathBuf};

use ffd_grid::GridError;
use mesh_types::{Axis, ErrorCategory};
use thiserror::Error;

/// Result type for FFD file I/O.
pub type FfdIoResult<T> = Result<T, FfdIoError>;

/// Errors that can occur while reading or writing FFD files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FfdIoError {
    /// Input file or directory not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A snapshot directory holds no matching CSV files.
    #[error("no '{prefix}<timestep>.csv' files found in {dir}")]
    NoSnapshots {
        /// Directory that was searched.
        dir: PathBuf,
        /// File name prefix that was searched for.
        prefix: String,
    },

    /// A token or row could not be parsed.
    #[error("line {line}: {message}")]
    Format {
        /// One-based line number.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// A Plot3D channel holds fewer values than its dimensions declare.
    #[error("block {block} {channel} channel: expected {expected} values, found {got}")]
    DimensionMismatch {
        /// Zero-based block index.
        block: usize,
        /// Coordinate channel being read.
        channel: Axis,
        /// `nx * ny * nz`.
        expected: usize,
        /// Values actually present.
        got: usize,
    },

    /// Content that is invalid but not tied to a line.
    #[error("malformed input: {message}")]
    Malformed {
        /// Description of what was invalid.
        message: String,
    },

    /// A corner-box configuration could not be decoded.
    #[error("invalid configuration {path}: {source}")]
    Config {
        /// Configuration file.
        path: PathBuf,
        /// Decoder error, with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// There is nothing to write.
    #[error("no {what} to write")]
    Empty {
        /// What was missing.
        what: &'static str,
    },

    /// A lattice could not be built.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// XML or archive encoding failed.
    #[error("{message}")]
    Encode {
        /// Description of the failure.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FfdIoError {
    /// Create a `Format` error for a one-based line number.
    #[must_use]
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create a `Malformed` error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub(crate) fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Map the error onto the shared taxonomy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } | Self::NoSnapshots { .. } => ErrorCategory::MissingInput,
            Self::Format { .. }
            | Self::DimensionMismatch { .. }
            | Self::Malformed { .. }
            | Self::Config { .. } => ErrorCategory::Format,
            Self::Empty { .. } => ErrorCategory::Usage,
            Self::Grid(e) => e.category(),
            Self::Encode { .. } | Self::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Read a whole text file, mapping `NotFound` onto [`FfdIoError::FileNotFound`].
pub(crate) fn read_text(path: &Path) -> FfdIoResult<String> {
    std::fs::read_to_string(path).map_err(|e| not_found_or_io(e, path))
}

pub(crate) fn not_found_or_io(e: std::io::Error, path: &Path) -> FfdIoError {
    if e.kind() == std::io::ErrorKind::NotFound {
        FfdIoError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        FfdIoError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let missing = FfdIoError::FileNotFound {
            path: PathBuf::from("a.xyz"),
        };
        assert_eq!(missing.category(), ErrorCategory::MissingInput);
        assert_eq!(FfdIoError::format(3, "bad").category(), ErrorCategory::Format);
        let grid = FfdIoError::from(GridError::InvalidPointCount {
            axis: Axis::X,
            count: 1,
        });
        assert_eq!(grid.category(), ErrorCategory::Usage);
    }

    #[test]
    fn missing_file_maps_to_file_not_found() {
        let err = read_text(Path::new("/definitely/not/here.xyz")).err();
        assert!(matches!(err, Some(FfdIoError::FileNotFound { .. })));
    }

    #[test]
    fn format_message_names_the_line() {
        assert_eq!(FfdIoError::format(7, "bad token").to_string(), "line 7: bad token");
    }
}

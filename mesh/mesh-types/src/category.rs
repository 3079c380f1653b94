//! Error taxonomy shared by the toolkit crates.

use std::fmt;

/// Broad class of a failure, independent of which crate raised it.
///
/// Every error enum in the workspace maps its variants onto one of these
/// through a `category()` method, so the command-line front end can pick an
/// exit status without matching on every concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A required input file does not exist.
    MissingInput,
    /// Input content is not well-formed for its declared format.
    Format,
    /// Invalid parameters: point counts, margins, degenerate geometry.
    Usage,
    /// Operating-system level I/O failure.
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingInput => "missing input",
            Self::Format => "format error",
            Self::Usage => "usage error",
            Self::Io => "I/O error",
        };
        f.write_str(label)
    }
}

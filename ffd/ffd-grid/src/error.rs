//! Error types for grid generation.

use mesh_types::{Axis, ErrorCategory};
use thiserror::Error;

/// Errors that can occur while building a structured grid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    /// An axis was given fewer than two points.
    #[error("{axis} point count must be at least 2, got {count}")]
    InvalidPointCount {
        /// The offending axis.
        axis: Axis,
        /// The requested count.
        count: usize,
    },

    /// The lattice coordinates would not fit in addressable memory.
    #[error("grid of {nx} x {ny} x {nz} points is too large")]
    GridTooLarge {
        /// Points along X.
        nx: usize,
        /// Points along Y.
        ny: usize,
        /// Points along Z.
        nz: usize,
    },

    /// A margin is negative or not a number.
    #[error("{axis} margin must be non-negative and finite, got {margin}")]
    NegativeMargin {
        /// The offending axis.
        axis: Axis,
        /// The rejected margin.
        margin: f64,
    },

    /// The box has zero or negative extent along an axis.
    #[error("box is degenerate along {axis}: min {min} is not below max {max}")]
    DegenerateBox {
        /// The offending axis.
        axis: Axis,
        /// Lower bound after overrides and margins.
        min: f64,
        /// Upper bound after overrides and margins.
        max: f64,
    },

    /// Two opposite corners of a hexahedron coincide.
    #[error("corners {first} and {second} are opposite but coincide")]
    DegenerateCorners {
        /// Index of the first corner.
        first: usize,
        /// Index of the opposite corner.
        second: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("{what} contains a non-finite coordinate")]
    NonFinite {
        /// Which input was rejected.
        what: &'static str,
    },

    /// A coordinate channel does not hold `nx * ny * nz` values.
    #[error("{channel} channel holds {got} values, expected {expected}")]
    ChannelLength {
        /// The offending channel.
        channel: Axis,
        /// `nx * ny * nz`.
        expected: usize,
        /// Actual length.
        got: usize,
    },
}

impl GridError {
    /// Map the error onto the shared taxonomy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::ChannelLength { .. } => ErrorCategory::Format,
            Self::InvalidPointCount { .. }
            | Self::GridTooLarge { .. }
            | Self::NegativeMargin { .. }
            | Self::DegenerateBox { .. }
            | Self::DegenerateCorners { .. }
            | Self::NonFinite { .. } => ErrorCategory::Usage,
        }
    }
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

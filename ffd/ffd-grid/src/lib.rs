//! Structured FFD control lattices.
//!
//! A free-form deformation (FFD) box is a coarse `nx × ny × nz` lattice of
//! control points enclosing a surface. This crate builds such lattices in two
//! ways:
//!
//! - **Corner-based**: [`generate_from_corners`] blends the eight corners of a
//!   [`CornerSet`] trilinearly, so sheared hexahedra work as well as boxes
//! - **Offset box**: [`generate_offset_box`] takes a geometry's [`Aabb`],
//!   optional per-axis [`AxisRange`] overrides and per-axis margins, and fills
//!   the resulting box with evenly spaced points
//!
//! The offset box is the axis-aligned special case of the corner form; both
//! give identical lattices for the same box and counts.
//!
//! # Point order
//!
//! A [`StructuredGrid`] stores x, y and z as three separate channels, the way
//! Plot3D files do. Index `i` (along X) varies fastest and `k` (along Z)
//! slowest: flat index = `(k * ny + j) * nx + i`.
//!
//! # Example
//!
//! ```
//! use ffd_grid::{CornerSet, GridDims, OffsetBoxParams, generate_from_corners, generate_offset_box};
//! use mesh_types::{Aabb, Point3};
//!
//! let geometry = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 1.0, 0.5));
//! let params = OffsetBoxParams::default().with_counts(5, 2, 2);
//!
//! let grid = generate_offset_box(&geometry, &params).unwrap();
//! assert_eq!(grid.point_count(), 20);
//!
//! // Same box through the corner path
//! let bounds = grid.bounds();
//! let corners = CornerSet::from_aabb(&bounds).unwrap();
//! let again = generate_from_corners(&corners, GridDims::new(5, 2, 2).unwrap());
//! assert_eq!(grid, again);
//! ```
//!
//! [`Aabb`]: mesh_types::Aabb

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod corners;
mod dims;
mod error;
mod generate;
mod grid;
mod interp;
mod offset;

pub use corners::{CornerSet, OPPOSITE_PAIRS};
pub use dims::GridDims;
pub use error::{GridError, GridResult};
pub use generate::generate_from_corners;
pub use grid::StructuredGrid;
pub use interp::{lerp_at, linspace};
pub use offset::{AxisRange, OffsetBoxParams, generate_offset_box, offset_box_bounds};

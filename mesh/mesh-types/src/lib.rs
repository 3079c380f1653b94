//! Core surface types for the FFD toolkit.
//!
//! This crate provides the foundational types shared by the STL and FFD crates:
//!
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Axis`] - One of the three Cartesian axes
//! - [`Facet`] - A triangle with its stored facet normal
//! - [`TriangleSoup`] - An unindexed list of facets, as stored in STL files
//! - [`ErrorCategory`] - The error taxonomy shared by every crate in the workspace
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`. STL files
//! store `f32`; values are widened on read and narrowed on write.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Facet, MeshBounds, Point3, TriangleSoup};
//!
//! let mut soup = TriangleSoup::new("part");
//! soup.facets.push(Facet::from_vertices([
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ]));
//!
//! let bounds = soup.bounds();
//! assert_eq!(bounds.max, Point3::new(1.0, 1.0, 0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod axis;
mod bounds;
mod category;
mod facet;
mod soup;
mod traits;

pub use axis::Axis;
pub use bounds::Aabb;
pub use category::ErrorCategory;
pub use facet::Facet;
pub use soup::TriangleSoup;
pub use traits::MeshBounds;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

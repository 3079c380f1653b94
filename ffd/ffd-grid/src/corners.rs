//! The eight corners of a control hexahedron.

use mesh_types::{Aabb, Point3};

use crate::{GridError, GridResult};

/// Index pairs of corners that sit at opposite ends of a body diagonal.
pub const OPPOSITE_PAIRS: [(usize, usize); 4] = [(0, 6), (1, 7), (2, 4), (3, 5)];

/// Eight points spanning a (possibly sheared) hexahedron.
///
/// Corners follow a fixed low/high convention:
///
/// | Index | Position |
/// |-------|----------|
/// | 0 | `(xmin, ymin, zmin)` |
/// | 1 | `(xmax, ymin, zmin)` |
/// | 2 | `(xmax, ymin, zmax)` |
/// | 3 | `(xmin, ymin, zmax)` |
/// | 4 | `(xmin, ymax, zmin)` |
/// | 5 | `(xmax, ymax, zmin)` |
/// | 6 | `(xmax, ymax, zmax)` |
/// | 7 | `(xmin, ymax, zmax)` |
///
/// So corners 0-3 form the `ymin` face and 4-7 the `ymax` face, and
/// [`OPPOSITE_PAIRS`] lists the body diagonals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSet {
    corners: [Point3<f64>; 8],
}

impl CornerSet {
    /// Validate and wrap eight corners.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NonFinite`] if a coordinate is NaN or infinite,
    /// or [`GridError::DegenerateCorners`] if two opposite corners coincide.
    pub fn new(corners: [Point3<f64>; 8]) -> GridResult<Self> {
        if corners.iter().any(|c| !c.iter().all(|v| v.is_finite())) {
            return Err(GridError::NonFinite { what: "corner set" });
        }
        for (first, second) in OPPOSITE_PAIRS {
            if corners[first] == corners[second] {
                return Err(GridError::DegenerateCorners { first, second });
            }
        }
        Ok(Self { corners })
    }

    /// The corners of an axis-aligned box.
    ///
    /// # Errors
    ///
    /// Same as [`CornerSet::new`]; a box that is flat on every axis has
    /// coinciding diagonals.
    ///
    /// # Example
    ///
    /// ```
    /// use ffd_grid::CornerSet;
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0));
    /// let corners = CornerSet::from_aabb(&aabb).unwrap();
    /// assert_eq!(corners.get(2), Point3::new(1.0, 0.0, 3.0));
    /// assert_eq!(corners.get(7), Point3::new(0.0, 2.0, 3.0));
    /// ```
    pub fn from_aabb(aabb: &Aabb) -> GridResult<Self> {
        let (lo, hi) = (aabb.min, aabb.max);
        Self::new([
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
        ])
    }

    /// Corner by index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Point3<f64> {
        self.corners[index]
    }

    /// All eight corners in convention order.
    #[inline]
    #[must_use]
    pub const fn as_array(&self) -> &[Point3<f64>; 8] {
        &self.corners
    }
}

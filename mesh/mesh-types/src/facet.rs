//! Triangle facet as stored in STL files.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle together with the facet normal recorded for it.
///
/// STL stores a normal per facet that is frequently stale or zero, so the
/// stored value is kept as-is and [`Facet::computed_normal`] is available
/// when the geometric normal is needed.
///
/// # Example
///
/// ```
/// use mesh_types::{Facet, Point3};
///
/// let facet = Facet::from_vertices([
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
///
/// assert!((facet.normal.z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Stored facet normal.
    pub normal: Vector3<f64>,
    /// The three corner positions, in winding order.
    pub vertices: [Point3<f64>; 3],
}

impl Facet {
    /// Create a facet from an explicit normal and three vertices.
    #[inline]
    #[must_use]
    pub const fn new(normal: Vector3<f64>, vertices: [Point3<f64>; 3]) -> Self {
        Self { normal, vertices }
    }

    /// Create a facet whose normal is computed from the vertex winding.
    #[must_use]
    pub fn from_vertices(vertices: [Point3<f64>; 3]) -> Self {
        let normal = unit_normal(&vertices);
        Self { normal, vertices }
    }

    /// Unit normal from the right-hand rule over the vertex winding.
    ///
    /// Returns the zero vector for degenerate (zero-area) facets.
    #[must_use]
    pub fn computed_normal(&self) -> Vector3<f64> {
        unit_normal(&self.vertices)
    }

    /// Scale all vertex coordinates about the origin.
    ///
    /// Uniform positive scaling preserves orientation, so the stored normal
    /// is carried over unchanged.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let [v0, v1, v2] = self.vertices;
        Self {
            normal: self.normal,
            vertices: [
                Point3::from(v0.coords * factor),
                Point3::from(v1.coords * factor),
                Point3::from(v2.coords * factor),
            ],
        }
    }
}

fn unit_normal(vertices: &[Point3<f64>; 3]) -> Vector3<f64> {
    let e1 = vertices[1] - vertices[0];
    let e2 = vertices[2] - vertices[0];
    let normal = e1.cross(&e2);
    let len = normal.norm();
    if len > f64::EPSILON {
        normal / len
    } else {
        Vector3::zeros()
    }
}

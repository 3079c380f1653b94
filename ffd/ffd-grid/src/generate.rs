//! Trilinear lattice generation from a corner set.

use mesh_types::Point3;
use tracing::debug;

use crate::interp::lerp_at;
use crate::{CornerSet, GridDims, StructuredGrid};

fn lerp_point(a: &Point3<f64>, b: &Point3<f64>, index: usize, count: usize) -> Point3<f64> {
    Point3::new(
        lerp_at(a.x, b.x, index, count),
        lerp_at(a.y, b.y, index, count),
        lerp_at(a.z, b.z, index, count),
    )
}

/// Fill a lattice by trilinear blending of eight corners.
///
/// The blend is computed as three nested 1-D interpolations:
///
/// 1. along `k` on the four edges running from the `zmin` to the `zmax`
///    face (corners 0→3, 1→2, 4→7 and 5→6),
/// 2. along `j` between the `ymin` and `ymax` edge points of each level,
///    giving the two ends of every row,
/// 3. along `i` between the row ends.
///
/// The result is exact trilinear interpolation for any hexahedron. For an
/// axis-aligned box it reproduces [`generate_offset_box`](crate::generate_offset_box)
/// bit for bit, since interpolating between equal values is exact.
///
/// # Example
///
/// ```
/// use ffd_grid::{CornerSet, GridDims, generate_from_corners};
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
/// let corners = CornerSet::from_aabb(&aabb).unwrap();
/// let grid = generate_from_corners(&corners, GridDims::new(3, 2, 2).unwrap());
///
/// assert_eq!(&grid.x()[..3], &[0.0, 1.0, 2.0]);
/// ```
#[must_use]
pub fn generate_from_corners(corners: &CornerSet, dims: GridDims) -> StructuredGrid {
    let c = corners.as_array();
    let (nx, ny, nz) = (dims.nx(), dims.ny(), dims.nz());
    debug!(%dims, "blending corner set");

    let mut points = Vec::with_capacity(dims.point_count());
    for k in 0..nz {
        let low_front = lerp_point(&c[0], &c[3], k, nz);
        let high_front = lerp_point(&c[1], &c[2], k, nz);
        let low_back = lerp_point(&c[4], &c[7], k, nz);
        let high_back = lerp_point(&c[5], &c[6], k, nz);
        for j in 0..ny {
            let row_start = lerp_point(&low_front, &low_back, j, ny);
            let row_end = lerp_point(&high_front, &high_back, j, ny);
            points.extend((0..nx).map(|i| lerp_point(&row_start, &row_end, i, nx)));
        }
    }
    StructuredGrid::from_points(dims, &points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::Aabb;

    fn dims(nx: usize, ny: usize, nz: usize) -> GridDims {
        GridDims::new(nx, ny, nz).unwrap()
    }

    fn corners_of(min: [f64; 3], max: [f64; 3]) -> CornerSet {
        let aabb = Aabb::new(Point3::from(min), Point3::from(max));
        CornerSet::from_aabb(&aabb).unwrap()
    }

    #[test]
    fn unit_cube_yields_its_eight_corners() {
        let grid = generate_from_corners(&corners_of([0.0; 3], [1.0; 3]), dims(2, 2, 2));
        let mut seen: Vec<[f64; 3]> = grid.points().map(|p| [p.x, p.y, p.z]).collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mut expected = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    expected.push([x, y, z]);
                }
            }
        }
        assert_eq!(seen, expected);
    }

    #[test]
    fn line_box_x_sequence_repeats() {
        let grid = generate_from_corners(&corners_of([0.0; 3], [2.0, 0.0, 0.0]), dims(3, 2, 2));
        assert_eq!(grid.point_count(), 12);
        for chunk in grid.x().chunks(3) {
            assert_eq!(chunk, &[0.0, 1.0, 2.0]);
        }
        assert_eq!(grid.index(1, 0, 0), 1);
        assert_eq!(grid.x()[1], 1.0);
        assert!(grid.y().iter().chain(grid.z()).all(|&v| v == 0.0));
    }

    #[test]
    fn sheared_hexahedron_matches_direct_trilinear() {
        let raw = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.2, 0.1),
            Point3::new(3.5, 0.1, 2.2),
            Point3::new(0.4, -0.3, 2.0),
            Point3::new(0.1, 1.5, -0.2),
            Point3::new(2.8, 1.9, 0.3),
            Point3::new(3.3, 2.1, 2.5),
            Point3::new(0.6, 1.7, 1.9),
        ];
        let corners = CornerSet::new(raw).unwrap();
        let d = dims(4, 3, 5);
        let grid = generate_from_corners(&corners, d);

        for k in 0..d.nz() {
            for j in 0..d.ny() {
                for i in 0..d.nx() {
                    #[allow(clippy::cast_precision_loss)]
                    let (u, v, w) = (
                        i as f64 / (d.nx() - 1) as f64,
                        j as f64 / (d.ny() - 1) as f64,
                        k as f64 / (d.nz() - 1) as f64,
                    );
                    let expected = raw[0].coords * ((1.0 - u) * (1.0 - v) * (1.0 - w))
                        + raw[1].coords * (u * (1.0 - v) * (1.0 - w))
                        + raw[2].coords * (u * (1.0 - v) * w)
                        + raw[3].coords * ((1.0 - u) * (1.0 - v) * w)
                        + raw[4].coords * ((1.0 - u) * v * (1.0 - w))
                        + raw[5].coords * (u * v * (1.0 - w))
                        + raw[6].coords * (u * v * w)
                        + raw[7].coords * ((1.0 - u) * v * w);
                    let got = grid.point(i, j, k);
                    assert_relative_eq!(got.coords, expected, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn corners_land_on_lattice_corners() {
        let raw = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.2, 0.1),
            Point3::new(3.5, 0.1, 2.2),
            Point3::new(0.4, -0.3, 2.0),
            Point3::new(0.1, 1.5, -0.2),
            Point3::new(2.8, 1.9, 0.3),
            Point3::new(3.3, 2.1, 2.5),
            Point3::new(0.6, 1.7, 1.9),
        ];
        let corners = CornerSet::new(raw).unwrap();
        let grid = generate_from_corners(&corners, dims(5, 4, 3));
        assert_eq!(grid.point(0, 0, 0), raw[0]);
        assert_eq!(grid.point(4, 0, 0), raw[1]);
        assert_eq!(grid.point(4, 0, 2), raw[2]);
        assert_eq!(grid.point(0, 0, 2), raw[3]);
        assert_eq!(grid.point(0, 3, 0), raw[4]);
        assert_eq!(grid.point(4, 3, 0), raw[5]);
        assert_eq!(grid.point(4, 3, 2), raw[6]);
        assert_eq!(grid.point(0, 3, 2), raw[7]);
    }
}

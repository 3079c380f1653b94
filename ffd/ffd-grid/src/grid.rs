//! Structured point lattice stored as three coordinate channels.

use mesh_types::{Aabb, Axis, Point3};

use crate::{GridDims, GridError, GridResult};

/// An `nx × ny × nz` lattice of points.
///
/// Coordinates are held the way Plot3D stores them: three flat channels of
/// equal length, one per axis, with `i` varying fastest and `k` slowest.
/// The flat position of `(i, j, k)` is `(k * ny + j) * nx + i`.
///
/// # Examples
///
/// ```
/// use ffd_grid::{GridDims, StructuredGrid};
///
/// let dims = GridDims::new(2, 2, 2).unwrap();
/// let grid = StructuredGrid::from_channels(
///     dims,
///     vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
///     vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0],
///     vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
/// )
/// .unwrap();
///
/// assert_eq!(grid.point(1, 1, 1).x, 1.0);
/// assert_eq!(grid.point_count(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredGrid {
    dims: GridDims,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl StructuredGrid {
    /// Assemble a grid from its three coordinate channels.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ChannelLength`] if any channel does not hold
    /// exactly `nx * ny * nz` values.
    pub fn from_channels(
        dims: GridDims,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
    ) -> GridResult<Self> {
        let expected = dims.point_count();
        for (channel, values) in Axis::ALL.into_iter().zip([&x, &y, &z]) {
            if values.len() != expected {
                return Err(GridError::ChannelLength {
                    channel,
                    expected,
                    got: values.len(),
                });
            }
        }
        Ok(Self { dims, x, y, z })
    }

    /// Outer product of three 1-D coordinate sequences.
    ///
    /// Point `(i, j, k)` is `(xs[i], ys[j], zs[k])`. The sequence lengths
    /// must match `dims`, which callers inside this crate guarantee.
    pub(crate) fn from_axis_values(dims: GridDims, xs: &[f64], ys: &[f64], zs: &[f64]) -> Self {
        let n = dims.point_count();
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);
        for &zk in zs {
            for &yj in ys {
                for &xi in xs {
                    x.push(xi);
                    y.push(yj);
                    z.push(zk);
                }
            }
        }
        Self { dims, x, y, z }
    }

    /// Build from points already in flat `(k, j, i)` order.
    pub(crate) fn from_points(dims: GridDims, points: &[Point3<f64>]) -> Self {
        let x = points.iter().map(|p| p.x).collect();
        let y = points.iter().map(|p| p.y).collect();
        let z = points.iter().map(|p| p.z).collect();
        Self { dims, x, y, z }
    }

    /// Lattice point counts.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.x.len()
    }

    /// Flat index of `(i, j, k)`.
    #[inline]
    #[must_use]
    pub const fn index(&self, i: usize, j: usize, k: usize) -> usize {
        self.dims.index(i, j, k)
    }

    /// The point at `(i, j, k)`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for the grid dimensions.
    #[must_use]
    pub fn point(&self, i: usize, j: usize, k: usize) -> Point3<f64> {
        self.point_at(self.index(i, j, k))
    }

    /// The point at a flat index.
    ///
    /// # Panics
    ///
    /// Panics if `flat >= self.point_count()`.
    #[must_use]
    pub fn point_at(&self, flat: usize) -> Point3<f64> {
        Point3::new(self.x[flat], self.y[flat], self.z[flat])
    }

    /// Iterate over all points in flat order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point3<f64>> + '_ {
        (0..self.point_count()).map(|flat| self.point_at(flat))
    }

    /// All X coordinates in flat order.
    #[inline]
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// All Y coordinates in flat order.
    #[inline]
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// All Z coordinates in flat order.
    #[inline]
    #[must_use]
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// One coordinate channel.
    #[must_use]
    pub fn channel(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Axis-aligned bounds of every lattice point.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for p in self.points() {
            aabb.expand_to_include(&p);
        }
        aabb
    }
}

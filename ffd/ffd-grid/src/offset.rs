//! Axis-aligned control boxes offset from a geometry's bounds.

use mesh_types::{Aabb, Axis, Point3, Vector3};
use tracing::{debug, info};

use crate::interp::linspace;
use crate::{GridDims, GridError, GridResult, StructuredGrid};

/// Optional replacement for one axis's geometry interval.
///
/// Either end may be overridden independently; the other end keeps the
/// geometry's own bound.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisRange {
    /// Replaces the lower bound when set.
    pub start: Option<f64>,
    /// Replaces the upper bound when set.
    pub end: Option<f64>,
}

impl AxisRange {
    /// Override both ends.
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether either end is overridden.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Apply to a geometry interval.
    #[must_use]
    pub fn apply(&self, min: f64, max: f64) -> (f64, f64) {
        (self.start.unwrap_or(min), self.end.unwrap_or(max))
    }
}

/// Parameters for [`generate_offset_box`].
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `counts` | `[11, 2, 2]` |
/// | `margins` | `(0.1, 0.1, 0.05)` |
/// | `ranges` | no overrides |
///
/// # Example
///
/// ```
/// use ffd_grid::{AxisRange, OffsetBoxParams};
/// use mesh_types::Axis;
///
/// let params = OffsetBoxParams::default()
///     .with_counts(5, 3, 3)
///     .with_margins(0.2, 0.2, 0.1)
///     .with_range(Axis::X, AxisRange::new(-1.0, 4.0));
/// assert_eq!(params.counts, [5, 3, 3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetBoxParams {
    /// Lattice points along X, Y and Z.
    pub counts: [usize; 3],
    /// Margin added on both sides of each axis, in geometry units.
    pub margins: Vector3<f64>,
    /// Per-axis overrides of the geometry interval, applied before margins.
    pub ranges: [AxisRange; 3],
}

impl Default for OffsetBoxParams {
    fn default() -> Self {
        Self {
            counts: [11, 2, 2],
            margins: Vector3::new(0.1, 0.1, 0.05),
            ranges: [AxisRange::default(); 3],
        }
    }
}

impl OffsetBoxParams {
    /// Set the lattice point counts.
    #[must_use]
    pub const fn with_counts(mut self, nx: usize, ny: usize, nz: usize) -> Self {
        self.counts = [nx, ny, nz];
        self
    }

    /// Set the per-axis margins.
    #[must_use]
    pub fn with_margins(mut self, x: f64, y: f64, z: f64) -> Self {
        self.margins = Vector3::new(x, y, z);
        self
    }

    /// Override one axis's geometry interval.
    #[must_use]
    pub const fn with_range(mut self, axis: Axis, range: AxisRange) -> Self {
        self.ranges[axis.index()] = range;
        self
    }

    /// Validate the point counts.
    ///
    /// # Errors
    ///
    /// See [`GridDims::new`].
    pub fn dims(&self) -> GridResult<GridDims> {
        let [nx, ny, nz] = self.counts;
        GridDims::new(nx, ny, nz)
    }
}

/// The control box for a geometry: overrides first, then margins.
///
/// # Errors
///
/// - [`GridError::NegativeMargin`] if a margin is negative or NaN
/// - [`GridError::NonFinite`] if the geometry bounds or an override is not finite
/// - [`GridError::DegenerateBox`] if an axis ends up with `min >= max`
///
/// # Example
///
/// ```
/// use ffd_grid::{OffsetBoxParams, offset_box_bounds};
/// use mesh_types::{Aabb, Point3};
///
/// let geometry = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
/// let params = OffsetBoxParams::default().with_margins(0.5, 0.25, 0.0);
/// let b = offset_box_bounds(&geometry, &params).unwrap();
/// assert_eq!(b.min, Point3::new(-0.5, -0.25, 0.0));
/// assert_eq!(b.max, Point3::new(1.5, 1.25, 1.0));
/// ```
pub fn offset_box_bounds(geometry: &Aabb, params: &OffsetBoxParams) -> GridResult<Aabb> {
    for axis in Axis::ALL {
        let margin = params.margins[axis.index()];
        if margin.is_nan() || margin < 0.0 || margin.is_infinite() {
            return Err(GridError::NegativeMargin { axis, margin });
        }
    }

    let mut min = Point3::origin();
    let mut max = Point3::origin();
    for axis in Axis::ALL {
        let (lo, hi) = geometry.axis_range(axis);
        let range = &params.ranges[axis.index()];
        let (lo, hi) = range.apply(lo, hi);
        if range.is_set() {
            debug!(%axis, start = lo, end = hi, "axis range overridden");
        }
        if !lo.is_finite() || !hi.is_finite() {
            return Err(GridError::NonFinite { what: "box bounds" });
        }
        min[axis.index()] = lo;
        max[axis.index()] = hi;
    }

    let expanded = Aabb { min, max }.expanded_per_axis(&params.margins);
    for axis in Axis::ALL {
        let (lo, hi) = expanded.axis_range(axis);
        if lo >= hi {
            return Err(GridError::DegenerateBox {
                axis,
                min: lo,
                max: hi,
            });
        }
    }
    Ok(expanded)
}

/// Build an axis-aligned control lattice around a geometry.
///
/// Point counts are validated before anything else. Each axis of the
/// [`offset_box_bounds`] box is split into evenly spaced values with
/// [`linspace`](crate::linspace), and the lattice is their outer product.
///
/// # Errors
///
/// Any error from [`GridDims::new`] or [`offset_box_bounds`].
///
/// # Example
///
/// ```
/// use ffd_grid::{OffsetBoxParams, generate_offset_box};
/// use mesh_types::{Aabb, Point3};
///
/// let geometry = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
/// let params = OffsetBoxParams::default()
///     .with_counts(2, 2, 2)
///     .with_margins(0.0, 0.0, 0.0);
/// let grid = generate_offset_box(&geometry, &params).unwrap();
/// assert_eq!(grid.point_count(), 8);
/// ```
pub fn generate_offset_box(geometry: &Aabb, params: &OffsetBoxParams) -> GridResult<StructuredGrid> {
    let dims = params.dims()?;
    let bounds = offset_box_bounds(geometry, params)?;

    let [xs, ys, zs] = Axis::ALL.map(|axis| {
        let (lo, hi) = bounds.axis_range(axis);
        linspace(lo, hi, dims.along(axis))
    });

    info!(
        %dims,
        points = dims.point_count(),
        min = ?bounds.min.coords.as_slice(),
        max = ?bounds.max.coords.as_slice(),
        "generated offset box"
    );
    Ok(StructuredGrid::from_axis_values(dims, &xs, &ys, &zs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_types::ErrorCategory;

    fn unit() -> Aabb {
        Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn defaults_match_documented_values() {
        let p = OffsetBoxParams::default();
        assert_eq!(p.counts, [11, 2, 2]);
        assert_eq!(p.margins, Vector3::new(0.1, 0.1, 0.05));
        assert!(p.ranges.iter().all(|r| !r.is_set()));
    }

    #[test]
    fn unit_cube_without_margin_gives_eight_corners() {
        let params = OffsetBoxParams::default()
            .with_counts(2, 2, 2)
            .with_margins(0.0, 0.0, 0.0);
        let grid = generate_offset_box(&unit(), &params).unwrap();
        let mut pts: Vec<[f64; 3]> = grid.points().map(|p| [p.x, p.y, p.z]).collect();
        pts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        pts.dedup();
        assert_eq!(pts.len(), 8);
        assert!(pts.iter().flatten().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn single_point_axis_is_rejected_before_bounds() {
        // Degenerate geometry would also fail; the count error must win.
        let flat = Aabb::new(Point3::origin(), Point3::origin());
        for counts in [[1, 2, 2], [2, 1, 2], [2, 2, 1]] {
            let params = OffsetBoxParams::default().with_counts(counts[0], counts[1], counts[2]);
            let err = generate_offset_box(&flat, &params).err();
            assert!(matches!(err, Some(GridError::InvalidPointCount { count: 1, .. })));
            assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Usage));
        }
    }

    #[test]
    fn negative_margin_is_rejected() {
        let params = OffsetBoxParams::default().with_margins(0.1, -0.01, 0.0);
        assert!(matches!(
            offset_box_bounds(&unit(), &params),
            Err(GridError::NegativeMargin { axis: Axis::Y, .. })
        ));
        let params = OffsetBoxParams::default().with_margins(f64::NAN, 0.0, 0.0);
        assert!(offset_box_bounds(&unit(), &params).is_err());
    }

    #[test]
    fn zero_extent_without_margin_is_degenerate() {
        let line = Aabb::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        let params = OffsetBoxParams::default()
            .with_counts(3, 2, 2)
            .with_margins(0.0, 0.0, 0.0);
        assert!(matches!(
            generate_offset_box(&line, &params),
            Err(GridError::DegenerateBox { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn margin_rescues_flat_geometry() {
        let plate = Aabb::new(Point3::origin(), Point3::new(2.0, 1.0, 0.0));
        let b = offset_box_bounds(&plate, &OffsetBoxParams::default()).unwrap();
        assert_eq!(b.min.z, -0.05);
        assert_eq!(b.max.z, 0.05);
    }

    #[test]
    fn override_applies_before_margin() {
        let geometry = Aabb::new(Point3::new(-3.0, 0.0, 0.0), Point3::new(5.0, 1.0, 1.0));
        let params = OffsetBoxParams::default()
            .with_margins(0.5, 0.0, 0.0)
            .with_range(Axis::X, AxisRange::new(0.0, 2.0));
        let b = offset_box_bounds(&geometry, &params).unwrap();
        assert_eq!(b.min.x, -0.5);
        assert_eq!(b.max.x, 2.5);
        assert_eq!(b.min.y, 0.0);
    }

    #[test]
    fn half_override_keeps_other_end() {
        let range = AxisRange {
            start: None,
            end: Some(7.0),
        };
        assert_eq!(range.apply(1.0, 3.0), (1.0, 7.0));
        assert!(range.is_set());
    }

    #[test]
    fn inverted_override_is_rejected() {
        let params = OffsetBoxParams::default()
            .with_margins(0.0, 0.0, 0.0)
            .with_range(Axis::Z, AxisRange::new(1.0, 0.0));
        assert!(matches!(
            offset_box_bounds(&unit(), &params),
            Err(GridError::DegenerateBox { axis: Axis::Z, .. })
        ));
    }

    #[test]
    fn default_counts_produce_forty_four_points() {
        let grid = generate_offset_box(&unit(), &OffsetBoxParams::default()).unwrap();
        assert_eq!(grid.point_count(), 44);
        assert_eq!(grid.x()[0], -0.1);
        assert_eq!(grid.x()[10], 1.1);
    }
}

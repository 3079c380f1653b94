//! Lattice point counts.

use std::fmt;

use mesh_types::Axis;

use crate::{GridError, GridResult};

/// Storage of one lattice point: x, y and z channels of `f64`.
const BYTES_PER_POINT: usize = 3 * std::mem::size_of::<f64>();

/// Number of lattice points along each axis.
///
/// Every count is at least 2, so each axis spans a proper interval.
///
/// # Examples
///
/// ```
/// use ffd_grid::GridDims;
///
/// let dims = GridDims::new(3, 2, 2).unwrap();
/// assert_eq!(dims.point_count(), 12);
/// assert_eq!(dims.index(1, 0, 0), 1);
/// assert!(GridDims::new(1, 2, 2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDims {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl GridDims {
    /// Validate and create a set of point counts.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidPointCount`] if any count is below 2, or
    /// [`GridError::GridTooLarge`] if the three coordinate channels could
    /// not be allocated.
    pub fn new(nx: usize, ny: usize, nz: usize) -> GridResult<Self> {
        for (axis, count) in Axis::ALL.into_iter().zip([nx, ny, nz]) {
            if count < 2 {
                return Err(GridError::InvalidPointCount { axis, count });
            }
        }
        let bytes = nx
            .checked_mul(ny)
            .and_then(|n| n.checked_mul(nz))
            .and_then(|n| n.checked_mul(BYTES_PER_POINT));
        match bytes {
            Some(b) if isize::try_from(b).is_ok() => Ok(Self { nx, ny, nz }),
            _ => Err(GridError::GridTooLarge { nx, ny, nz }),
        }
    }

    /// Points along X (the fastest-varying index `i`).
    #[inline]
    #[must_use]
    pub const fn nx(&self) -> usize {
        self.nx
    }

    /// Points along Y (index `j`).
    #[inline]
    #[must_use]
    pub const fn ny(&self) -> usize {
        self.ny
    }

    /// Points along Z (the slowest-varying index `k`).
    #[inline]
    #[must_use]
    pub const fn nz(&self) -> usize {
        self.nz
    }

    /// Count along one axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// `[nx, ny, nz]`.
    #[must_use]
    pub const fn as_array(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Total number of lattice points.
    #[inline]
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Flat index of `(i, j, k)` with `i` fastest and `k` slowest.
    #[inline]
    #[must_use]
    pub const fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.ny + j) * self.nx + i
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {}", self.nx, self.ny, self.nz)
    }
}

//! JSON configuration for multi-block corner boxes.
//!
//! ```json
//! {
//!   "blocks": [
//!     { "kind": "box", "counts": [10, 6, 6],
//!       "min": [1.53, 0.5, 0.0], "max": [4.2, 1.2, 1.0],
//!       "relative_margin": 0.05 },
//!     { "kind": "corners", "counts": [3, 2, 2],
//!       "corners": [[0,0,0],[1,0,0],[1,0,1],[0,0,1],[0,1,0],[1,1,0],[1,1,1],[0,1,1]] }
//!   ]
//! }
//! ```

use std::path::Path;

use ffd_grid::{
    CornerSet, GridDims, GridError, OffsetBoxParams, StructuredGrid, generate_from_corners,
    offset_box_bounds,
};
use mesh_types::{Aabb, Axis, Point3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FfdIoError, FfdIoResult, read_text};

const fn default_relative_margin() -> f64 {
    0.05
}

/// One block of a corner-box configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockConfig {
    /// Eight explicit corners in the standard order.
    Corners {
        /// Lattice points along X, Y and Z.
        counts: [usize; 3],
        /// Corner coordinates.
        corners: [[f64; 3]; 8],
    },
    /// An axis-aligned box grown by a fraction of its own extent.
    Box {
        /// Lattice points along X, Y and Z.
        counts: [usize; 3],
        /// Lower corner.
        min: [f64; 3],
        /// Upper corner.
        max: [f64; 3],
        /// Each axis grows by `relative_margin * extent` on both sides.
        #[serde(default = "default_relative_margin")]
        relative_margin: f64,
    },
}

impl BlockConfig {
    /// Point counts of this block.
    #[must_use]
    pub const fn counts(&self) -> [usize; 3] {
        match self {
            Self::Corners { counts, .. } | Self::Box { counts, .. } => *counts,
        }
    }

    /// The corner set this block describes.
    ///
    /// # Errors
    ///
    /// - [`GridError::DegenerateBox`] if a box has `min >= max` on an axis
    /// - [`GridError::NegativeMargin`] if the relative margin is negative
    /// - any error from [`CornerSet::new`]
    pub fn corner_set(&self) -> Result<CornerSet, GridError> {
        match self {
            Self::Corners { corners, .. } => CornerSet::new(corners.map(Point3::from)),
            Self::Box {
                min,
                max,
                relative_margin,
                ..
            } => {
                let aabb = Aabb {
                    min: Point3::from(*min),
                    max: Point3::from(*max),
                };
                for axis in Axis::ALL {
                    let (lo, hi) = aabb.axis_range(axis);
                    if lo >= hi {
                        return Err(GridError::DegenerateBox {
                            axis,
                            min: lo,
                            max: hi,
                        });
                    }
                }
                let margins = aabb.size() * *relative_margin;
                let params =
                    OffsetBoxParams::default().with_margins(margins.x, margins.y, margins.z);
                CornerSet::from_aabb(&offset_box_bounds(&aabb, &params)?)
            }
        }
    }

    /// Generate the lattice of this block.
    ///
    /// # Errors
    ///
    /// Any error from [`GridDims::new`] or [`BlockConfig::corner_set`].
    pub fn build(&self) -> Result<StructuredGrid, GridError> {
        let [nx, ny, nz] = self.counts();
        let dims = GridDims::new(nx, ny, nz)?;
        let corners = self.corner_set()?;
        Ok(generate_from_corners(&corners, dims))
    }
}

/// A list of blocks written together as one multi-block Plot3D file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerBoxConfig {
    /// Blocks in output order.
    pub blocks: Vec<BlockConfig>,
}

impl CornerBoxConfig {
    /// Decode a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`FfdIoError::Config`] if the text is not a valid configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use ffd_io::{BlockConfig, CornerBoxConfig};
    ///
    /// let json = r#"{"blocks":[{"kind":"box","counts":[4,2,2],"min":[0,0,0],"max":[1,1,1]}]}"#;
    /// let config = CornerBoxConfig::from_json(json, "inline").unwrap();
    /// assert!(matches!(
    ///     config.blocks[0],
    ///     BlockConfig::Box { relative_margin, .. } if relative_margin == 0.05
    /// ));
    /// ```
    pub fn from_json<P: AsRef<Path>>(text: &str, origin: P) -> FfdIoResult<Self> {
        serde_json::from_str(text).map_err(|source| FfdIoError::Config {
            path: origin.as_ref().to_path_buf(),
            source,
        })
    }

    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// [`FfdIoError::FileNotFound`] if the file is missing, otherwise any
    /// error from [`CornerBoxConfig::from_json`].
    pub fn load<P: AsRef<Path>>(path: P) -> FfdIoResult<Self> {
        let path = path.as_ref();
        let text = read_text(path)?;
        Self::from_json(&text, path)
    }

    /// Generate every block.
    ///
    /// # Errors
    ///
    /// [`FfdIoError::Empty`] if there are no blocks, or
    /// [`FfdIoError::Grid`] for the first block that cannot be built.
    pub fn build_grids(&self) -> FfdIoResult<Vec<StructuredGrid>> {
        if self.blocks.is_empty() {
            return Err(FfdIoError::Empty { what: "blocks" });
        }
        self.blocks
            .iter()
            .enumerate()
            .map(|(n, block)| {
                let grid = block.build()?;
                debug!(block = n, dims = %grid.dims(), "built block");
                Ok(grid)
            })
            .collect()
    }
}

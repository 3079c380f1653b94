//! File formats around FFD control lattices.
//!
//! - **Plot3D** ([`read_plot3d`], [`load_plot3d`], [`write_plot3d`],
//!   [`save_plot3d`]): multi-block coordinate files with x, y and z stored as
//!   separate channels
//! - **Control-point CSV** ([`read_control_points`], [`discover_snapshots`]):
//!   per-timestep snapshots of an optimisation run
//! - **VTK XML** ([`write_vts`], [`write_vtp`], [`write_pvd`]): lattices and
//!   snapshot series for ParaView, with [`convert_series`] driving a whole
//!   directory and [`write_zip_bundle`] packing the result
//! - **OpenFOAM** ([`write_foam_dict`]): `controlPoints` dictionaries, with
//!   numbers formatted by [`format_general`]
//! - **Corner-box configuration** ([`CornerBoxConfig`]): JSON list of
//!   [`BlockConfig`] blocks to generate
//!
//! Files are rendered in memory and written through
//! [`mesh_io::write_atomic`], so a failed run leaves no partial output.
//!
//! # Example
//!
//! ```
//! use ffd_grid::{OffsetBoxParams, generate_offset_box};
//! use ffd_io::{Plot3dWriteOptions, read_plot3d, write_plot3d};
//! use mesh_types::{Aabb, Point3};
//!
//! let geometry = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0));
//! let grid = generate_offset_box(&geometry, &OffsetBoxParams::default()).unwrap();
//!
//! let mut text = Vec::new();
//! write_plot3d(std::slice::from_ref(&grid), &Plot3dWriteOptions::default(), &mut text).unwrap();
//!
//! let back = read_plot3d(std::str::from_utf8(&text).unwrap()).unwrap();
//! assert_eq!(back, vec![grid]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod archive;
mod config;
mod control_points;
mod error;
mod foam;
mod plot3d;
mod series;
mod vtk;

pub use archive::write_zip_bundle;
pub use config::{BlockConfig, CornerBoxConfig};
pub use control_points::{
    ControlPoint, ControlPointSnapshot, SnapshotFile, discover_snapshots, load_snapshot,
    read_control_points,
};
pub use error::{FfdIoError, FfdIoResult};
pub use foam::{FoamDictOptions, format_general, write_foam_dict};
pub use plot3d::{Plot3dWriteOptions, load_plot3d, read_plot3d, save_plot3d, write_plot3d};
pub use series::{ConvertedSnapshot, SeriesConfig, SeriesReport, convert_series};
pub use vtk::{PvdEntry, write_pvd, write_vtp, write_vts};

//! `offset-box`: an axis-aligned FFD lattice around an STL surface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ffd_grid::{AxisRange, OffsetBoxParams, generate_offset_box, offset_box_bounds};
use ffd_io::{Plot3dWriteOptions, save_plot3d};
use mesh_io::read_stl_bounds;
use mesh_types::Axis;
use owo_colors::OwoColorize;

use super::{done, print_bounds};

/// Arguments of `offset-box`.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Surface to enclose
    pub stl: PathBuf,

    /// Plot3D file to write
    pub output: PathBuf,

    /// Lattice points along X
    #[arg(long, default_value_t = 11)]
    pub nx: usize,

    /// Lattice points along Y
    #[arg(long, default_value_t = 2)]
    pub ny: usize,

    /// Lattice points along Z
    #[arg(long, default_value_t = 2)]
    pub nz: usize,

    /// Margin added on both sides along X
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub offset_x: f64,

    /// Margin added on both sides along Y
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub offset_y: f64,

    /// Margin added on both sides along Z
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub offset_z: f64,

    /// Replace the geometry's lower X bound before the margin is added
    #[arg(long, allow_negative_numbers = true)]
    pub x_start: Option<f64>,

    /// Replace the geometry's upper X bound before the margin is added
    #[arg(long, allow_negative_numbers = true)]
    pub x_end: Option<f64>,

    /// Replace the geometry's lower Y bound before the margin is added
    #[arg(long, allow_negative_numbers = true)]
    pub y_start: Option<f64>,

    /// Replace the geometry's upper Y bound before the margin is added
    #[arg(long, allow_negative_numbers = true)]
    pub y_end: Option<f64>,

    /// Replace the geometry's lower Z bound before the margin is added
    #[arg(long, allow_negative_numbers = true)]
    pub z_start: Option<f64>,

    /// Replace the geometry's upper Z bound before the margin is added
    #[arg(long, allow_negative_numbers = true)]
    pub z_end: Option<f64>,

    /// Fixed digits after the decimal point (default: shortest exact form)
    #[arg(long)]
    pub decimals: Option<usize>,
}

impl Args {
    /// Lattice parameters from the flags.
    pub fn params(&self) -> OffsetBoxParams {
        let ranges = [
            (Axis::X, self.x_start, self.x_end),
            (Axis::Y, self.y_start, self.y_end),
            (Axis::Z, self.z_start, self.z_end),
        ];
        ranges.into_iter().fold(
            OffsetBoxParams::default()
                .with_counts(self.nx, self.ny, self.nz)
                .with_margins(self.offset_x, self.offset_y, self.offset_z),
            |params, (axis, start, end)| params.with_range(axis, AxisRange { start, end }),
        )
    }

    fn write_options(&self) -> Plot3dWriteOptions {
        Plot3dWriteOptions {
            decimals: self.decimals,
        }
    }
}

/// Run the generator.
pub fn run(args: &Args) -> Result<()> {
    let params = args.params();
    params.dims()?;

    let geometry = read_stl_bounds(&args.stl)
        .with_context(|| format!("failed to read {}", args.stl.display()))?;
    print_bounds("Geometry bounds:", &geometry, 6);

    for axis in Axis::ALL {
        let range = params.ranges[axis.index()];
        if range.is_set() {
            let show = |v: Option<f64>| v.map_or_else(|| "geometry".to_string(), |v| format!("{v:.6}"));
            println!(
                "  {} {axis} range: [{}, {}]",
                "override".yellow(),
                show(range.start),
                show(range.end)
            );
        }
    }

    let bounds = offset_box_bounds(&geometry, &params)?;
    print_bounds("Offset box bounds:", &bounds, 6);

    let grid = generate_offset_box(&geometry, &params)?;
    let dims = grid.dims();
    println!(
        "{} {} × {} × {} = {}",
        "Control points:".bold(),
        dims.nx(),
        dims.ny(),
        dims.nz(),
        dims.point_count()
    );

    save_plot3d(&args.output, std::slice::from_ref(&grid), &args.write_options())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    done(&format!("Wrote Plot3D: {}", args.output.display()));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ffd_io::load_plot3d;
    use mesh_io::{StlEncoding, save_stl};
    use mesh_types::{Facet, Point3, TriangleSoup};

    fn args(stl: PathBuf, output: PathBuf) -> Args {
        Args {
            stl,
            output,
            nx: 11,
            ny: 2,
            nz: 2,
            offset_x: 0.1,
            offset_y: 0.1,
            offset_z: 0.05,
            x_start: None,
            x_end: None,
            y_start: None,
            y_end: None,
            z_start: None,
            z_end: None,
            decimals: None,
        }
    }

    fn write_wedge(path: &std::path::Path) {
        let mut soup = TriangleSoup::new("wedge");
        soup.facets.push(Facet::from_vertices([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.5),
        ]));
        save_stl(&soup, path, StlEncoding::Binary).unwrap();
    }

    #[test]
    fn overrides_become_axis_ranges() {
        let mut a = args(PathBuf::from("a.stl"), PathBuf::from("b.xyz"));
        a.x_start = Some(-1.0);
        a.z_end = Some(2.0);
        let params = a.params();
        assert_eq!(params.ranges[0], AxisRange { start: Some(-1.0), end: None });
        assert!(!params.ranges[1].is_set());
        assert_eq!(params.ranges[2], AxisRange { start: None, end: Some(2.0) });
    }

    #[test]
    fn writes_single_block_box() {
        let dir = tempfile::tempdir().unwrap();
        let stl = dir.path().join("wedge.stl");
        let out = dir.path().join("box.xyz");
        write_wedge(&stl);

        run(&args(stl, out.clone())).unwrap();

        let grids = load_plot3d(&out).unwrap();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].dims().as_array(), [11, 2, 2]);
        let b = grids[0].bounds();
        assert_relative_eq!(b.min, Point3::new(-0.1, -0.1, -0.05), epsilon = 1e-12);
        assert_relative_eq!(b.max, Point3::new(4.1, 1.1, 0.55), epsilon = 1e-12);
    }

    #[test]
    fn x_override_replaces_geometry_interval() {
        let dir = tempfile::tempdir().unwrap();
        let stl = dir.path().join("wedge.stl");
        let out = dir.path().join("box.xyz");
        write_wedge(&stl);

        let mut a = args(stl, out.clone());
        a.x_start = Some(1.0);
        a.x_end = Some(3.0);
        a.offset_x = 0.0;
        run(&a).unwrap();

        let grids = load_plot3d(&out).unwrap();
        let b = grids[0].bounds();
        assert_eq!((b.min.x, b.max.x), (1.0, 3.0));
    }

    #[test]
    fn bad_count_is_usage_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let stl = dir.path().join("wedge.stl");
        let out = dir.path().join("box.xyz");
        write_wedge(&stl);

        let mut a = args(stl, out.clone());
        a.ny = 1;
        let err = run(&a).unwrap_err();
        assert_eq!(super::super::exit_code(&err), 2);
        assert!(!out.exists());
    }

    #[test]
    fn unallocatable_count_is_usage_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let stl = dir.path().join("wedge.stl");
        let out = dir.path().join("box.xyz");
        write_wedge(&stl);

        let mut a = args(stl, out.clone());
        a.nx = 4_611_686_018_427_387_903;
        let err = run(&a).unwrap_err();
        assert_eq!(super::super::exit_code(&err), 2);
        assert!(!out.exists());
    }

    #[test]
    fn missing_stl_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(dir.path().join("nope.stl"), dir.path().join("box.xyz"));
        let err = run(&a).unwrap_err();
        assert_eq!(super::super::exit_code(&err), 1);
    }
}

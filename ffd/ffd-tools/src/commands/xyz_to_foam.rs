//! `xyz-to-foam`: Plot3D lattice to an OpenFOAM `controlPoints` dictionary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ffd_io::{FoamDictOptions, load_plot3d, write_foam_dict};
use mesh_io::write_atomic;
use mesh_types::{Aabb, Point3};
use owo_colors::OwoColorize;
use tracing::warn;

use super::{UsageError, done, print_bounds, stem_or};

/// Arguments of `xyz-to-foam`.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Plot3D file to convert
    pub input: PathBuf,

    /// Dictionary to write (default: input without extension)
    pub output: Option<PathBuf>,

    /// FFD box name for the `object` entry (default: output file name)
    pub box_name: Option<String>,
}

impl Args {
    /// The output path, defaulted from the input.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension(""))
    }
}

/// Run the conversion.
pub fn run(args: &Args) -> Result<()> {
    let output = args.output_path();
    if output == args.input {
        return Err(UsageError(format!(
            "output would overwrite the input {}; pass an explicit output path",
            args.input.display()
        ))
        .into());
    }
    let box_name = args
        .box_name
        .clone()
        .unwrap_or_else(|| stem_or(&output, "boxcpsBsplines0"));

    let grids = load_plot3d(&args.input)?;
    if grids.len() > 1 {
        warn!(
            blocks = grids.len(),
            "concatenating all blocks into one controlPoints list"
        );
    }

    let points: Vec<Point3<f64>> = grids.iter().flat_map(|g| g.points()).collect();
    for (n, grid) in grids.iter().enumerate() {
        println!("{} {n}: {}", "Block".bold(), grid.dims());
    }
    println!("{} {}", "Control points:".bold(), points.len());
    print_bounds("Coordinate ranges:", &Aabb::from_points(points.iter()), 6);

    let options = FoamDictOptions::default().with_object(box_name.as_str());
    let mut buffer = Vec::new();
    write_foam_dict(&points, &options, &mut buffer)?;
    write_atomic(&output, &buffer)
        .with_context(|| format!("failed to write {}", output.display()))?;
    done(&format!(
        "Wrote controlPoints for '{box_name}': {}",
        output.display()
    ));
    Ok(())
}

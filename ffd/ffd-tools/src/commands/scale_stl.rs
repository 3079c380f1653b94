//! `scale-stl`: multiply every vertex by a constant.

use std::path::PathBuf;

use anyhow::{Context, Result};
use mesh_io::{IoError, StlEncoding, load_stl, save_stl};
use mesh_types::MeshBounds;
use tracing::info;

use super::{UsageError, done, print_bounds, stem_or};

/// Arguments of `scale-stl`.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// STL to scale
    pub input: PathBuf,

    /// Output file (default: `<stem>_scaled.stl` next to the input)
    pub output: Option<PathBuf>,

    /// Scale factor (0.001 converts millimetres to metres)
    #[arg(long, default_value_t = 0.001)]
    pub factor: f64,

    /// Write ASCII instead of binary STL
    #[arg(long)]
    pub ascii: bool,
}

impl Args {
    /// The output path, defaulted from the input.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = stem_or(&self.input, "surface");
            self.input.with_file_name(format!("{stem}_scaled.stl"))
        })
    }
}

/// Run the scaling.
pub fn run(args: &Args) -> Result<()> {
    if !(args.factor.is_finite() && args.factor > 0.0) {
        return Err(UsageError(format!(
            "scale factor must be positive and finite, got {}",
            args.factor
        ))
        .into());
    }
    let output = args.output_path();

    let soup = load_stl(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let before = soup.bounds_opt().ok_or(IoError::EmptyMesh)?;
    print_bounds("Original bounds:", &before, 3);

    let scaled = soup.scaled(args.factor);
    print_bounds("Scaled bounds:", &scaled.bounds(), 6);
    info!(factor = args.factor, facets = scaled.facet_count(), "scaled surface");

    let encoding = if args.ascii {
        StlEncoding::Ascii
    } else {
        StlEncoding::Binary
    };
    save_stl(&scaled, &output, encoding)
        .with_context(|| format!("failed to write {}", output.display()))?;
    done(&format!("Wrote scaled STL: {}", output.display()));
    Ok(())
}

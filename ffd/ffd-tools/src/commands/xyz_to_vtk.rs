//! `xyz-to-vtk`: one ParaView `.vts` file per Plot3D block.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ffd_io::{load_plot3d, write_vts};
use mesh_io::write_atomic_all;
use owo_colors::OwoColorize;

use super::{done, with_suffix};

/// Arguments of `xyz-to-vtk`.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Plot3D file to convert
    pub input: PathBuf,

    /// Output base path without extension (default: input without extension)
    pub output: Option<PathBuf>,
}

/// Output file for block `n` of `count`.
pub fn block_path(base: &Path, n: usize, count: usize) -> PathBuf {
    if count == 1 {
        with_suffix(base, ".vts")
    } else {
        with_suffix(base, &format!("_block{n}.vts"))
    }
}

/// Run the conversion. Either every block file is written or none is.
pub fn run(args: &Args) -> Result<()> {
    let base = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension(""));

    let grids = load_plot3d(&args.input)?;
    println!(
        "{} {} ({} block(s))",
        "Read Plot3D:".bold(),
        args.input.display(),
        grids.len()
    );

    let mut outputs = Vec::with_capacity(grids.len());
    for (n, grid) in grids.iter().enumerate() {
        let mut buffer = Vec::new();
        write_vts(grid, &mut buffer)?;
        outputs.push((block_path(&base, n, grids.len()), buffer));
    }

    write_atomic_all(&outputs)
        .with_context(|| format!("failed to write {}", base.display()))?;
    for (grid, (path, _)) in grids.iter().zip(&outputs) {
        done(&format!("{} -> {}", grid.dims(), path.display()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TWO_BLOCKS: &str = "2\n2 2 2 2 2 2\n\
        0 1 0 1 0 1 0 1\n0 0 1 1 0 0 1 1\n0 0 0 0 1 1 1 1\n\
        5 6 5 6 5 6 5 6\n0 0 1 1 0 0 1 1\n0 0 0 0 1 1 1 1\n";

    #[test]
    fn block_naming() {
        let base = Path::new("out/ffd");
        assert_eq!(block_path(base, 0, 1), PathBuf::from("out/ffd.vts"));
        assert_eq!(block_path(base, 1, 3), PathBuf::from("out/ffd_block1.vts"));
    }

    #[test]
    fn single_block_uses_input_stem() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("box.xyz");
        std::fs::write(
            &input,
            "1\n2 2 2\n0 1 0 1 0 1 0 1\n0 0 1 1 0 0 1 1\n0 0 0 0 1 1 1 1\n",
        )
        .unwrap();

        run(&Args {
            input,
            output: None,
        })
        .unwrap();

        let vts = std::fs::read_to_string(dir.path().join("box.vts")).unwrap();
        assert!(vts.contains(r#"WholeExtent="0 1 0 1 0 1""#));
        assert!(vts.contains("Float64"));
    }

    #[test]
    fn multi_block_files_are_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blocks.xyz");
        std::fs::write(&input, TWO_BLOCKS).unwrap();

        let base = dir.path().join("paraview");
        run(&Args {
            input,
            output: Some(base),
        })
        .unwrap();

        assert!(dir.path().join("paraview_block0.vts").exists());
        assert!(dir.path().join("paraview_block1.vts").exists());
        assert!(!dir.path().join("paraview.vts").exists());
    }

    #[test]
    fn failed_block_write_leaves_no_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blocks.xyz");
        std::fs::write(&input, TWO_BLOCKS).unwrap();
        // A non-empty directory where the second block should go.
        let blocked = dir.path().join("paraview_block1.vts");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();

        let result = run(&Args {
            input,
            output: Some(dir.path().join("paraview")),
        });
        assert!(result.is_err());
        assert!(!dir.path().join("paraview_block0.vts").exists());
        assert!(blocked.is_dir());
    }

    #[test]
    fn malformed_plot3d_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.xyz");
        std::fs::write(&input, "1\n2 2 2\n0 1 0\n").unwrap();

        let err = run(&Args {
            input,
            output: None,
        })
        .unwrap_err();
        assert_eq!(super::super::exit_code(&err), 1);
        assert!(!dir.path().join("bad.vts").exists());
    }
}

//! `corner-box`: multi-block FFD lattices from a JSON configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ffd_io::{CornerBoxConfig, Plot3dWriteOptions, save_plot3d};
use owo_colors::OwoColorize;

use super::{done, print_bounds};

/// Arguments of `corner-box`.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// JSON block configuration
    pub config: PathBuf,

    /// Plot3D file to write
    pub output: PathBuf,

    /// Fixed digits after the decimal point (default: shortest exact form)
    #[arg(long)]
    pub decimals: Option<usize>,
}

/// Run the generator.
pub fn run(args: &Args) -> Result<()> {
    let config = CornerBoxConfig::load(&args.config)?;
    let grids = config.build_grids()?;

    for (n, grid) in grids.iter().enumerate() {
        let dims = grid.dims();
        println!(
            "{} {n}: {dims} = {} points",
            "Block".bold(),
            dims.point_count()
        );
        print_bounds("  bounds:", &grid.bounds(), 6);
    }

    let options = Plot3dWriteOptions {
        decimals: args.decimals,
    };
    save_plot3d(&args.output, &grids, &options)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    done(&format!(
        "Wrote {} block(s) to {}",
        grids.len(),
        args.output.display()
    ));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ffd_io::load_plot3d;
    use mesh_types::Point3;

    const TWO_BLOCKS: &str = r#"{
        "blocks": [
            { "kind": "box", "counts": [4, 3, 2],
              "min": [0.0, 0.0, 0.0], "max": [2.0, 1.0, 1.0],
              "relative_margin": 0.0 },
            { "kind": "corners", "counts": [2, 2, 2],
              "corners": [[0,0,0],[1,0,0],[1,0,1],[0,0,1],[0,1,0],[1,1,0],[1,1,1],[0,1,1]] }
        ]
    }"#;

    #[test]
    fn writes_all_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("blocks.json");
        let out = dir.path().join("blocks.xyz");
        std::fs::write(&config, TWO_BLOCKS).unwrap();

        run(&Args {
            config,
            output: out.clone(),
            decimals: None,
        })
        .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().nth(1), Some("4 3 2 2 2 2"));

        let grids = load_plot3d(&out).unwrap();
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].bounds().max, Point3::new(2.0, 1.0, 1.0));
        assert_eq!(grids[1].point_count(), 8);
    }

    #[test]
    fn missing_config_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&Args {
            config: dir.path().join("absent.json"),
            output: dir.path().join("out.xyz"),
            decimals: None,
        })
        .unwrap_err();
        assert_eq!(super::super::exit_code(&err), 1);
    }

    #[test]
    fn degenerate_block_exits_with_two() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("flat.json");
        std::fs::write(
            &config,
            r#"{"blocks":[{"kind":"box","counts":[2,2,2],"min":[0,0,0],"max":[1,0,1]}]}"#,
        )
        .unwrap();

        let out = dir.path().join("out.xyz");
        let err = run(&Args {
            config,
            output: out.clone(),
            decimals: Some(4),
        })
        .unwrap_err();
        assert_eq!(super::super::exit_code(&err), 2);
        assert!(!out.exists());
    }
}

//! `stl-to-ascii`: rewrite an STL in the text encoding.

use std::path::PathBuf;

use anyhow::{Context, Result};
use mesh_io::{StlEncoding, load_stl, save_stl};
use owo_colors::OwoColorize;

use super::{done, stem_or};

/// Arguments of `stl-to-ascii`.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Binary or ASCII STL to convert
    pub input: PathBuf,

    /// Output file (default: input with extension `.ascii.stl`)
    pub output: Option<PathBuf>,
}

impl Args {
    /// The output path, defaulted from the input.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("ascii.stl"))
    }
}

/// Run the conversion. Facet normals are carried over as stored.
pub fn run(args: &Args) -> Result<()> {
    let output = args.output_path();

    println!("{} {}", "Reading STL:".bold(), args.input.display());
    let mut soup = load_stl(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    soup.name = stem_or(&args.input, "solid");
    println!("  {} triangles", soup.facet_count());

    save_stl(&soup, &output, StlEncoding::Ascii)
        .with_context(|| format!("failed to write {}", output.display()))?;
    done(&format!("Wrote ASCII STL: {}", output.display()));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_io::{StlClassification, classify_stl, parse_stl};
    use mesh_types::{Facet, Point3, TriangleSoup, Vector3};

    #[test]
    fn default_output_path() {
        let args = Args {
            input: PathBuf::from("dir/car.stl"),
            output: None,
        };
        assert_eq!(args.output_path(), PathBuf::from("dir/car.ascii.stl"));
    }

    #[test]
    fn converts_binary_and_keeps_normals() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("part.stl");
        let mut soup = TriangleSoup::new("ignored");
        soup.facets.push(Facet::new(
            Vector3::new(0.0, 0.0, -1.0),
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        ));
        save_stl(&soup, &input, StlEncoding::Binary).unwrap();

        let args = Args {
            input: input.clone(),
            output: None,
        };
        run(&args).unwrap();

        let bytes = std::fs::read(dir.path().join("part.ascii.stl")).unwrap();
        assert_eq!(classify_stl(&bytes), StlClassification::Ascii);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("solid part\n"));
        assert!(text.trim_end().ends_with("endsolid part"));
        let back = parse_stl(&bytes).unwrap();
        assert_eq!(back.facets[0].normal, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            input: dir.path().join("nope.stl"),
            output: None,
        };
        let err = run(&args).unwrap_err();
        assert_eq!(super::super::exit_code(&err), 1);
    }
}

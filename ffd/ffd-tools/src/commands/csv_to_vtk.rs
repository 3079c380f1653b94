//! `csv-to-vtk`: control-point snapshots to a ParaView time series.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ffd_io::{SeriesConfig, convert_series};
use owo_colors::OwoColorize;

use super::done;

/// Arguments of `csv-to-vtk`.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Directory holding `<prefix><timestep>.csv` snapshots
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory for the `.vtp`, `.pvd` and `.zip` output
    #[arg(long, default_value = "./vtk_output")]
    pub output_dir: PathBuf,

    /// Snapshot file name prefix
    #[arg(long, default_value = "boxcpsBsplines")]
    pub prefix: String,

    /// Base name of the output files
    #[arg(long, default_value = "control_points")]
    pub name: String,

    /// Skip the zip bundle
    #[arg(long)]
    pub no_zip: bool,
}

impl Args {
    /// Series settings from the flags.
    pub fn config(&self) -> SeriesConfig {
        SeriesConfig::default()
            .with_input_dir(&self.input_dir)
            .with_output_dir(&self.output_dir)
            .with_prefix(&self.prefix)
            .with_name(&self.name)
            .with_zip(!self.no_zip)
    }
}

/// Run the conversion.
pub fn run(args: &Args) -> Result<()> {
    let config = args.config();
    let report = convert_series(&config).with_context(|| {
        format!(
            "failed to convert snapshots in {}",
            config.input_dir.display()
        )
    })?;

    println!(
        "{} {} snapshot(s)",
        "Converted".bold(),
        report.snapshots.len()
    );
    for snapshot in &report.snapshots {
        println!(
            "  t={:<6} {:>6} points -> {}",
            snapshot.timestep,
            snapshot.points,
            snapshot.vtp.display()
        );
    }
    done(&format!("Time series: {}", report.pvd.display()));
    if let Some(zip) = &report.zip {
        done(&format!("Archive: {}", zip.display()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::Path;

    const HEADER: &str = "\"Points:0\",\"Points:1\",\"Points:2\",\"i\",\"j\",\"k\",\"active:0\",\"active:1\",\"active:2\"\n";

    fn write_snapshot(dir: &Path, timestep: &str) {
        let body = format!("{HEADER}0,0,0,0,0,0,1,1,1\n1,0,0,1,0,0,0,1,1\n");
        std::fs::write(dir.join(format!("boxcpsBsplines{timestep}.csv")), body).unwrap();
    }

    fn args(input: &Path, output: &Path, no_zip: bool) -> Args {
        Args {
            input_dir: input.to_path_buf(),
            output_dir: output.to_path_buf(),
            prefix: "boxcpsBsplines".to_string(),
            name: "control_points".to_string(),
            no_zip,
        }
    }

    #[test]
    fn converts_series_with_archive() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("vtk");
        write_snapshot(dir.path(), "10");
        write_snapshot(dir.path(), "2");
        write_snapshot(dir.path(), "final");

        run(&args(dir.path(), &out, false)).unwrap();

        assert!(out.join("control_points_t0002.vtp").exists());
        assert!(out.join("control_points_t0010.vtp").exists());
        assert!(out.join("control_points_temporal.zip").exists());
        let pvd = std::fs::read_to_string(out.join("control_points_temporal.pvd")).unwrap();
        let first = pvd.find("t0002").expect("missing t0002");
        let second = pvd.find("t0010").expect("missing t0010");
        assert!(first < second);
    }

    #[test]
    fn no_zip_skips_archive() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("vtk");
        write_snapshot(dir.path(), "1");

        run(&args(dir.path(), &out, true)).unwrap();
        assert!(out.join("control_points_temporal.pvd").exists());
        assert!(!out.join("control_points_temporal.zip").exists());
    }

    #[test]
    fn empty_directory_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("vtk");
        let err = run(&args(dir.path(), &out, false)).unwrap_err();
        assert_eq!(super::super::exit_code(&err), 1);
        assert!(!out.exists());
    }
}

//! FFD control-box toolkit.
//!
//! One binary, one subcommand per conversion step of a shape-optimisation
//! workflow:
//!
//! - `ffd-tools stl-to-ascii <in.stl> [out.stl]` - rewrite an STL as text
//! - `ffd-tools scale-stl <in.stl> [out.stl] --factor 0.001` - scale a surface
//! - `ffd-tools offset-box <in.stl> <out.xyz>` - FFD box around a surface
//! - `ffd-tools corner-box <config.json> <out.xyz>` - FFD blocks from corners
//! - `ffd-tools xyz-to-vtk <in.xyz> [out]` - Plot3D to ParaView `.vts`
//! - `ffd-tools csv-to-vtk` - control-point CSV series to a `.pvd` time series
//! - `ffd-tools xyz-to-foam <in.xyz> [out] [box_name]` - Plot3D to OpenFOAM
//!
//! # Exit codes
//!
//! `0` on success, `2` for usage errors (bad counts, degenerate boxes, bad
//! arguments), `1` for everything else. Progress goes to stdout, errors and
//! log output to stderr. Use `-v`/`-vv` or `RUST_LOG` for more logging.

mod commands;

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Build and convert FFD control boxes
#[derive(Parser)]
#[command(name = "ffd-tools")]
#[command(about = "Build and convert FFD control boxes", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a binary or ASCII STL to ASCII STL
    StlToAscii(commands::stl_to_ascii::Args),

    /// Scale every vertex of an STL by a constant factor
    ScaleStl(commands::scale_stl::Args),

    /// Generate an FFD box around an STL with per-axis margins
    OffsetBox(commands::offset_box::Args),

    /// Generate multi-block FFD boxes from a JSON corner configuration
    CornerBox(commands::corner_box::Args),

    /// Convert a Plot3D file to VTK structured grids
    XyzToVtk(commands::xyz_to_vtk::Args),

    /// Convert control-point CSV snapshots to a VTK time series
    CsvToVtk(commands::csv_to_vtk::Args),

    /// Convert a Plot3D file to an OpenFOAM controlPoints dictionary
    XyzToFoam(commands::xyz_to_foam::Args),
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::StlToAscii(args) => commands::stl_to_ascii::run(&args),
        Commands::ScaleStl(args) => commands::scale_stl::run(&args),
        Commands::OffsetBox(args) => commands::offset_box::run(&args),
        Commands::CornerBox(args) => commands::corner_box::run(&args),
        Commands::XyzToVtk(args) => commands::xyz_to_vtk::run(&args),
        Commands::CsvToVtk(args) => commands::csv_to_vtk::run(&args),
        Commands::XyzToFoam(args) => commands::xyz_to_foam::run(&args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(commands::exit_code(&err))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn offset_box_defaults() {
        let cli = Cli::try_parse_from(["ffd-tools", "offset-box", "car.stl", "box.xyz"]).unwrap();
        let Commands::OffsetBox(args) = cli.command else {
            panic!("wrong subcommand");
        };
        let params = args.params();
        assert_eq!(params.counts, [11, 2, 2]);
        assert_eq!(params.margins.z, 0.05);
        assert!(args.decimals.is_none());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["ffd-tools", "-vv", "csv-to-vtk", "--no-zip"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::CsvToVtk(args) = cli.command else {
            panic!("wrong subcommand");
        };
        assert!(!args.config().zip);
    }

    #[test]
    fn scale_factor_default() {
        let cli = Cli::try_parse_from(["ffd-tools", "scale-stl", "in.stl"]).unwrap();
        let Commands::ScaleStl(args) = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(args.factor, 0.001);
        assert!(!args.ascii);
    }

    #[test]
    fn missing_positional_is_rejected() {
        assert!(Cli::try_parse_from(["ffd-tools", "offset-box", "car.stl"]).is_err());
    }
}

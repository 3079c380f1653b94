//! Subcommand implementations and shared output helpers.

pub mod corner_box;
pub mod csv_to_vtk;
pub mod offset_box;
pub mod scale_stl;
pub mod stl_to_ascii;
pub mod xyz_to_foam;
pub mod xyz_to_vtk;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ffd_grid::GridError;
use ffd_io::FfdIoError;
use mesh_io::IoError;
use mesh_types::{Aabb, Axis, ErrorCategory};
use owo_colors::OwoColorize;

/// An invalid argument combination detected by a command itself.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// The category of the first typed error in the chain.
pub fn category_of(err: &anyhow::Error) -> Option<ErrorCategory> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<IoError>() {
            Some(e.category())
        } else if let Some(e) = cause.downcast_ref::<GridError>() {
            Some(e.category())
        } else if let Some(e) = cause.downcast_ref::<FfdIoError>() {
            Some(e.category())
        } else if cause.downcast_ref::<UsageError>().is_some() {
            Some(ErrorCategory::Usage)
        } else {
            None
        }
    })
}

/// Process exit status for a failed command.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match category_of(err) {
        Some(ErrorCategory::Usage) => 2,
        _ => 1,
    }
}

/// `path` with `suffix` appended to its final component.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// File stem as a `String`, or `fallback` if there is none.
pub fn stem_or(path: &Path, fallback: &str) -> String {
    path.file_stem()
        .map_or_else(|| fallback.to_string(), |s| s.to_string_lossy().into_owned())
}

/// Print per-axis ranges under a bold title.
pub fn print_bounds(title: &str, aabb: &Aabb, decimals: usize) {
    println!("{}", title.bold());
    for axis in Axis::ALL {
        let (lo, hi) = aabb.axis_range(axis);
        println!(
            "  {}: [{lo:.decimals$}, {hi:.decimals$}]",
            axis.name().to_uppercase()
        );
    }
}

/// Print a green check mark line.
pub fn done(message: &str) {
    println!("{} {message}", "✓".green());
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn usage_errors_exit_with_two() {
        let grid: anyhow::Error = GridError::InvalidPointCount {
            axis: Axis::X,
            count: 1,
        }
        .into();
        assert_eq!(exit_code(&grid), 2);

        let wrapped = Err::<(), _>(UsageError("bad factor".into()))
            .context("while scaling").unwrap_err();
        assert_eq!(exit_code(&wrapped), 2);
    }

    #[test]
    fn other_errors_exit_with_one() {
        let missing: anyhow::Error = IoError::FileNotFound {
            path: PathBuf::from("x.stl"),
        }
        .into();
        assert_eq!(category_of(&missing), Some(ErrorCategory::MissingInput));
        assert_eq!(exit_code(&missing), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("untyped")), 1);
    }

    #[test]
    fn grid_error_inside_ffd_io_error_is_usage() {
        let err: anyhow::Error = FfdIoError::Grid(GridError::DegenerateCorners {
            first: 0,
            second: 6,
        })
        .into();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn path_helpers() {
        assert_eq!(
            with_suffix(Path::new("out/box"), "_block1.vts"),
            PathBuf::from("out/box_block1.vts")
        );
        assert_eq!(stem_or(Path::new("dir/car.stl"), "solid"), "car");
        assert_eq!(stem_or(Path::new(""), "solid"), "solid");
    }
}

//! Control-point snapshot CSV files.
//!
//! Each file holds one timestep of an optimisation run: a header row, then
//! one row per control point:
//!
//! ```text
//! x,y,z,i,j,k,active_x,active_y,active_z
//! 0.1,0.2,0.3,0,0,0,1,1,0
//! ```
//!
//! Files are named `<prefix><timestep>.csv`, for example
//! `boxcpsBsplines12.csv`.

use std::path::{Path, PathBuf};

use mesh_types::{Point3, Vector3};
use tracing::{debug, info, warn};

use crate::error::{FfdIoError, FfdIoResult, not_found_or_io, read_text};

const FIELD_COUNT: usize = 9;

/// One control point of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Position.
    pub position: Point3<f64>,
    /// Lattice index `(i, j, k)`.
    pub index: [i32; 3],
    /// Per-axis activity flags, usually 0 or 1.
    pub active: Vector3<f64>,
}

/// All control points of one timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointSnapshot {
    /// Timestep parsed from the file name.
    pub timestep: i64,
    /// Points in file order.
    pub points: Vec<ControlPoint>,
}

/// A discovered snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    /// Timestep parsed from the file name.
    pub timestep: i64,
    /// Full path to the CSV file.
    pub path: PathBuf,
}

fn parse_field(line: usize, name: &str, field: &str) -> FfdIoResult<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| FfdIoError::format(line, format!("invalid {name} '{}'", field.trim())))
}

fn parse_index(line: usize, name: &str, field: &str) -> FfdIoResult<i32> {
    let value = parse_field(line, name, field)?;
    // Indices may be written as floats ("3.0").
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(FfdIoError::format(
            line,
            format!("{name} must be an integer, got '{}'", field.trim()),
        ));
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(value as i32)
}

/// Parse the rows of one snapshot.
///
/// The first line is a header and is skipped; blank lines are ignored.
///
/// # Errors
///
/// [`FfdIoError::Format`] if a row does not have nine fields or a field
/// does not parse.
///
/// # Example
///
/// ```
/// use ffd_io::read_control_points;
///
/// let csv = "x,y,z,i,j,k,ax,ay,az\n1.5,0,0,2,0,1,1,0,0\n";
/// let points = read_control_points(csv).unwrap();
/// assert_eq!(points[0].index, [2, 0, 1]);
/// assert_eq!(points[0].position.x, 1.5);
/// ```
pub fn read_control_points(text: &str) -> FfdIoResult<Vec<ControlPoint>> {
    let mut points = Vec::new();
    for (n, row) in text.lines().enumerate().skip(1) {
        let line = n + 1;
        if row.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(FfdIoError::format(
                line,
                format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
            ));
        }
        points.push(ControlPoint {
            position: Point3::new(
                parse_field(line, "x", fields[0])?,
                parse_field(line, "y", fields[1])?,
                parse_field(line, "z", fields[2])?,
            ),
            index: [
                parse_index(line, "i", fields[3])?,
                parse_index(line, "j", fields[4])?,
                parse_index(line, "k", fields[5])?,
            ],
            active: Vector3::new(
                parse_field(line, "active_x", fields[6])?,
                parse_field(line, "active_y", fields[7])?,
                parse_field(line, "active_z", fields[8])?,
            ),
        });
    }
    Ok(points)
}

/// Read one snapshot file.
///
/// # Errors
///
/// [`FfdIoError::FileNotFound`] if the file is missing, otherwise any error
/// from [`read_control_points`].
pub fn load_snapshot(file: &SnapshotFile) -> FfdIoResult<ControlPointSnapshot> {
    let text = read_text(&file.path)?;
    let points = read_control_points(&text)?;
    debug!(path = %file.path.display(), timestep = file.timestep, points = points.len(), "read snapshot");
    Ok(ControlPointSnapshot {
        timestep: file.timestep,
        points,
    })
}

/// The timestep encoded in a file name, if it matches `<prefix><int>.csv`.
///
/// Returns `None` when the name does not have the prefix and extension at
/// all, and `Some(Err(suffix))` when it does but the middle is not an
/// integer.
fn timestep_of<'a>(file_name: &'a str, prefix: &str) -> Option<Result<i64, &'a str>> {
    let stem = file_name.strip_suffix(".csv")?;
    let suffix = stem.strip_prefix(prefix)?;
    Some(suffix.parse::<i64>().map_err(|_| suffix))
}

/// Find all `<prefix><timestep>.csv` files in a directory.
///
/// Files whose timestep is not an integer are skipped with a warning. The
/// result is sorted by timestep; when two files share a timestep only the
/// first by name is kept.
///
/// # Errors
///
/// - [`FfdIoError::FileNotFound`] if the directory does not exist
/// - [`FfdIoError::NoSnapshots`] if no file matches
pub fn discover_snapshots<P: AsRef<Path>>(dir: P, prefix: &str) -> FfdIoResult<Vec<SnapshotFile>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| not_found_or_io(e, dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        match timestep_of(name, prefix) {
            None => {}
            Some(Ok(timestep)) => files.push(SnapshotFile {
                timestep,
                path: entry.path(),
            }),
            Some(Err(suffix)) => {
                warn!(file = name, suffix, "could not extract timestep, skipping");
            }
        }
    }

    files.sort_by(|a, b| a.timestep.cmp(&b.timestep).then_with(|| a.path.cmp(&b.path)));
    files.dedup_by(|later, earlier| {
        let duplicate = later.timestep == earlier.timestep;
        if duplicate {
            warn!(
                timestep = later.timestep,
                kept = %earlier.path.display(),
                skipped = %later.path.display(),
                "duplicate timestep"
            );
        }
        duplicate
    });

    if files.is_empty() {
        return Err(FfdIoError::NoSnapshots {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        });
    }
    info!(dir = %dir.display(), count = files.len(), "discovered snapshots");
    Ok(files)
}

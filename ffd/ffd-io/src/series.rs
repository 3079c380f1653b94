//! Control-point CSV series to a ParaView time series.

use std::path::{Path, PathBuf};

use mesh_io::write_atomic_all;
use tracing::{debug, info};

use crate::archive::zip_entries;
use crate::control_points::{discover_snapshots, load_snapshot};
use crate::error::{FfdIoResult, not_found_or_io};
use crate::vtk::{PvdEntry, write_pvd, write_vtp};

/// Where to find snapshots and what to call the outputs.
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `input_dir` | `.` |
/// | `output_dir` | `./vtk_output` |
/// | `prefix` | `boxcpsBsplines` |
/// | `name` | `control_points` |
/// | `zip` | `true` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesConfig {
    /// Directory searched for `<prefix><timestep>.csv`.
    pub input_dir: PathBuf,
    /// Directory receiving the `.vtp`, `.pvd` and `.zip` files.
    pub output_dir: PathBuf,
    /// Snapshot file name prefix.
    pub prefix: String,
    /// Base name of the output files.
    pub name: String,
    /// Also bundle everything into `<name>_temporal.zip`.
    pub zip: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("./vtk_output"),
            prefix: "boxcpsBsplines".to_string(),
            name: "control_points".to_string(),
            zip: true,
        }
    }
}

impl SeriesConfig {
    /// Set the input directory.
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the snapshot file prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the output base name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enable or disable the zip bundle.
    #[must_use]
    pub const fn with_zip(mut self, zip: bool) -> Self {
        self.zip = zip;
        self
    }

    /// `<output_dir>/<name>_t<timestep:04>.vtp`.
    #[must_use]
    pub fn vtp_path(&self, timestep: i64) -> PathBuf {
        self.output_dir
            .join(format!("{}_t{timestep:04}.vtp", self.name))
    }

    /// `<output_dir>/<name>_temporal.pvd`.
    #[must_use]
    pub fn pvd_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_temporal.pvd", self.name))
    }

    /// `<output_dir>/<name>_temporal.zip`.
    #[must_use]
    pub fn zip_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_temporal.zip", self.name))
    }
}

/// One converted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedSnapshot {
    /// Timestep.
    pub timestep: i64,
    /// Number of control points.
    pub points: usize,
    /// Written `.vtp` file.
    pub vtp: PathBuf,
}

/// Everything [`convert_series`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesReport {
    /// Snapshots in timestep order.
    pub snapshots: Vec<ConvertedSnapshot>,
    /// The `.pvd` collection.
    pub pvd: PathBuf,
    /// The zip bundle, if requested.
    pub zip: Option<PathBuf>,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Convert every snapshot CSV in a directory into a `.vtp` time series.
///
/// Every snapshot, the `.pvd` collection and the optional zip bundle are
/// rendered in memory first. The output directory is created and written
/// only after all inputs parsed, so a bad snapshot leaves no output behind.
/// The `.pvd` collection references the `.vtp` files by base name, so the
/// output directory can be moved as a whole.
///
/// # Errors
///
/// - [`FfdIoError::FileNotFound`](crate::FfdIoError::FileNotFound) if the
///   input directory is missing
/// - [`FfdIoError::NoSnapshots`](crate::FfdIoError::NoSnapshots) if no CSV
///   file matches
/// - any parse or write error of an individual file
pub fn convert_series(config: &SeriesConfig) -> FfdIoResult<SeriesReport> {
    let files = discover_snapshots(&config.input_dir, &config.prefix)?;

    let mut snapshots = Vec::with_capacity(files.len());
    let mut entries = Vec::with_capacity(files.len());
    let mut outputs = Vec::with_capacity(files.len() + 2);
    for file in &files {
        let snapshot = load_snapshot(file)?;
        let vtp = config.vtp_path(snapshot.timestep);

        let mut buffer = Vec::new();
        write_vtp(&snapshot.points, &mut buffer)?;
        debug!(timestep = snapshot.timestep, points = snapshot.points.len(), "rendered snapshot");

        entries.push(PvdEntry {
            timestep: snapshot.timestep,
            file: file_name(&vtp),
        });
        snapshots.push(ConvertedSnapshot {
            timestep: snapshot.timestep,
            points: snapshot.points.len(),
            vtp: vtp.clone(),
        });
        outputs.push((vtp, buffer));
    }

    let pvd = config.pvd_path();
    let mut collection = Vec::new();
    write_pvd(&entries, &mut collection)?;

    let zip = if config.zip {
        // Collection first, then the snapshots, each by base name.
        let bundle: Vec<(String, Vec<u8>)> = std::iter::once((file_name(&pvd), collection.clone()))
            .chain(outputs.iter().map(|(path, contents)| (file_name(path), contents.clone())))
            .collect();
        Some((config.zip_path(), zip_entries(&bundle)?))
    } else {
        None
    };

    outputs.push((pvd.clone(), collection));
    let zip = zip.map(|(path, archive)| {
        outputs.push((path.clone(), archive));
        path
    });

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| not_found_or_io(e, &config.output_dir))?;
    write_atomic_all(&outputs)?;
    info!(
        snapshots = snapshots.len(),
        pvd = %pvd.display(),
        zip = zip.is_some(),
        "wrote time series"
    );

    Ok(SeriesReport {
        snapshots,
        pvd,
        zip,
    })
}

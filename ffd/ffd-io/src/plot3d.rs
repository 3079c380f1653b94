//! Plot3D-style multi-block coordinate files.
//!
//! # Format
//!
//! ```text
//! nblocks
//! nx0 ny0 nz0 [nx1 ny1 nz1 ...]
//! x values of block 0
//! y values of block 0
//! z values of block 0
//! ... (three lines per further block)
//! ```
//!
//! Each coordinate line holds `nx * ny * nz` whitespace-separated numbers in
//! flat order, `i` fastest and `k` slowest. The reader is token based, so
//! values may also wrap across lines.

use std::io::Write;
use std::path::Path;

use ffd_grid::{GridDims, StructuredGrid};
use mesh_io::write_atomic;
use mesh_types::Axis;
use tracing::{debug, info};

use crate::error::{FfdIoError, FfdIoResult, read_text};

/// Options for [`write_plot3d`].
///
/// By default every value is written with the shortest decimal text that
/// parses back to the same `f64`, so a read after a write is lossless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plot3dWriteOptions {
    /// Fixed number of digits after the decimal point, if set.
    pub decimals: Option<usize>,
}

impl Plot3dWriteOptions {
    /// Write every value with `decimals` fractional digits.
    #[must_use]
    pub const fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    fn format(&self, value: f64) -> String {
        match self.decimals {
            Some(d) => format!("{value:.d$}"),
            None => format!("{value}"),
        }
    }
}

/// Whitespace tokens tagged with their one-based line number.
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: Box::new(
                text.lines()
                    .enumerate()
                    .flat_map(|(n, line)| line.split_whitespace().map(move |t| (n + 1, t))),
            ),
            last_line: 1,
        }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        let item = self.inner.next();
        if let Some((line, _)) = item {
            self.last_line = line;
        }
        item
    }

    fn next_count(&mut self, what: &str) -> FfdIoResult<usize> {
        let (line, token) = self
            .next()
            .ok_or_else(|| FfdIoError::format(self.last_line, format!("missing {what}")))?;
        token
            .parse::<usize>()
            .map_err(|_| FfdIoError::format(line, format!("invalid {what} '{token}'")))
    }
}

/// Parse Plot3D text into one grid per block.
///
/// # Errors
///
/// - [`FfdIoError::Format`] for a bad block count, a bad or too small
///   dimension, an unparsable coordinate, or values left over after the
///   last block
/// - [`FfdIoError::DimensionMismatch`] if a channel ends early
///
/// # Example
///
/// ```
/// use ffd_io::read_plot3d;
///
/// let text = "1\n2 2 2\n0 1 0 1 0 1 0 1\n0 0 1 1 0 0 1 1\n0 0 0 0 1 1 1 1\n";
/// let blocks = read_plot3d(text).unwrap();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].point(1, 1, 1).z, 1.0);
/// ```
pub fn read_plot3d(text: &str) -> FfdIoResult<Vec<StructuredGrid>> {
    let mut tokens = Tokens::new(text);

    let block_count = tokens.next_count("block count")?;
    if block_count == 0 {
        return Err(FfdIoError::format(1, "block count must be at least 1"));
    }

    // Header counts are untrusted; storage grows only with tokens actually read.
    let mut all_dims = Vec::new();
    for block in 0..block_count {
        let nx = tokens.next_count("nx")?;
        let ny = tokens.next_count("ny")?;
        let nz = tokens.next_count("nz")?;
        let dims = GridDims::new(nx, ny, nz).map_err(|e| {
            FfdIoError::format(tokens.last_line, format!("block {block}: {e}"))
        })?;
        all_dims.push(dims);
    }
    debug!(blocks = block_count, "read Plot3D header");

    let mut grids = Vec::with_capacity(all_dims.len());
    for (block, dims) in all_dims.into_iter().enumerate() {
        let n = dims.point_count();
        let mut channels: [Vec<f64>; 3] = Default::default();
        for (axis, values) in Axis::ALL.into_iter().zip(channels.iter_mut()) {
            while values.len() < n {
                let Some((line, token)) = tokens.next() else {
                    return Err(FfdIoError::DimensionMismatch {
                        block,
                        channel: axis,
                        expected: n,
                        got: values.len(),
                    });
                };
                let value = token.parse::<f64>().map_err(|_| {
                    FfdIoError::format(line, format!("invalid {axis} coordinate '{token}'"))
                })?;
                values.push(value);
            }
        }
        let [x, y, z] = channels;
        grids.push(StructuredGrid::from_channels(dims, x, y, z)?);
    }

    if let Some((line, token)) = tokens.next() {
        return Err(FfdIoError::format(
            line,
            format!("unexpected value '{token}' after the last block"),
        ));
    }

    Ok(grids)
}

/// Read a Plot3D file from disk.
///
/// # Errors
///
/// [`FfdIoError::FileNotFound`] if the file is missing, otherwise any error
/// from [`read_plot3d`].
pub fn load_plot3d<P: AsRef<Path>>(path: P) -> FfdIoResult<Vec<StructuredGrid>> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let grids = read_plot3d(&text)?;
    info!(path = %path.display(), blocks = grids.len(), "loaded Plot3D file");
    Ok(grids)
}

/// Write grids as a multi-block Plot3D file.
///
/// All block dimensions go on line 2, followed by three coordinate lines
/// per block.
///
/// # Errors
///
/// [`FfdIoError::Empty`] if `grids` is empty, or [`FfdIoError::Io`] if the
/// writer fails.
pub fn write_plot3d<W: Write>(
    grids: &[StructuredGrid],
    options: &Plot3dWriteOptions,
    mut out: W,
) -> FfdIoResult<()> {
    if grids.is_empty() {
        return Err(FfdIoError::Empty { what: "blocks" });
    }

    writeln!(out, "{}", grids.len())?;
    let dims_line: Vec<String> = grids
        .iter()
        .map(|g| {
            let d = g.dims();
            format!("{} {} {}", d.nx(), d.ny(), d.nz())
        })
        .collect();
    writeln!(out, "{}", dims_line.join(" "))?;

    for grid in grids {
        for axis in Axis::ALL {
            let line: Vec<String> = grid
                .channel(axis)
                .iter()
                .map(|&v| options.format(v))
                .collect();
            writeln!(out, "{}", line.join(" "))?;
        }
    }
    Ok(())
}

/// Write grids to a Plot3D file, replacing it atomically.
///
/// # Errors
///
/// Any error from [`write_plot3d`], or [`FfdIoError::Io`] if the file
/// cannot be written.
pub fn save_plot3d<P: AsRef<Path>>(
    path: P,
    grids: &[StructuredGrid],
    options: &Plot3dWriteOptions,
) -> FfdIoResult<()> {
    let path = path.as_ref();
    let mut buffer = Vec::new();
    write_plot3d(grids, options, &mut buffer)?;
    write_atomic(path, &buffer)?;
    info!(path = %path.display(), blocks = grids.len(), "saved Plot3D file");
    Ok(())
}

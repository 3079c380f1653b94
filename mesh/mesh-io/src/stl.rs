//! STL (Stereolithography) file format support.
//!
//! Supports both ASCII and binary STL formats.
//!
//! # Format Detection
//!
//! [`classify_stl`] inspects the leading bytes of a file:
//! - Binary files whose size matches `84 + 50 * count` are binary, even when
//!   the free-text header happens to begin with `solid`
//! - Otherwise files that start with `solid` (after optional whitespace) and
//!   carry no NUL bytes in the first 80 bytes are ASCII
//! - Anything else at least 84 bytes long is treated as binary; shorter input
//!   is malformed
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (often not accurate)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (usually 0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```

use std::io::Write;
use std::path::Path;

use mesh_types::{Aabb, Facet, MeshBounds, Point3, TriangleSoup, Vector3};
use tracing::{debug, info, warn};

use crate::atomic::write_atomic;
use crate::error::{IoError, IoResult, read_input};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Header plus the triangle count field.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Text placed in the header of binary files we write.
const BINARY_HEADER_TEXT: &[u8] = b"Binary STL written by mesh-io";

/// Output encoding for [`save_stl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlEncoding {
    /// Compact little-endian binary.
    Binary,
    /// Line-oriented text.
    Ascii,
}

/// Result of sniffing the first bytes of an STL file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlClassification {
    /// Binary encoding.
    Binary,
    /// ASCII encoding.
    Ascii,
    /// Neither encoding fits.
    Malformed {
        /// Why the input was rejected.
        reason: &'static str,
    },
}

/// Decide which STL encoding `bytes` uses without parsing the body.
///
/// # Example
///
/// ```
/// use mesh_io::{StlClassification, classify_stl};
///
/// assert_eq!(classify_stl(b"solid part\nendsolid part\n"), StlClassification::Ascii);
/// assert!(matches!(classify_stl(b"abc"), StlClassification::Malformed { .. }));
/// ```
#[must_use]
pub fn classify_stl(bytes: &[u8]) -> StlClassification {
    if bytes.is_empty() {
        return StlClassification::Malformed {
            reason: "file is empty",
        };
    }

    if binary_size_matches(bytes) {
        return StlClassification::Binary;
    }

    if starts_with_solid(bytes) && !bytes[..bytes.len().min(HEADER_SIZE)].contains(&0) {
        return StlClassification::Ascii;
    }

    if bytes.len() >= PREAMBLE_SIZE {
        StlClassification::Binary
    } else {
        StlClassification::Malformed {
            reason: "too short for a binary header and no `solid` keyword",
        }
    }
}

/// Whether the declared triangle count accounts for the file size exactly.
fn binary_size_matches(bytes: &[u8]) -> bool {
    declared_triangle_count(bytes).is_some_and(|count| {
        let expected = PREAMBLE_SIZE as u64 + u64::from(count) * TRIANGLE_SIZE as u64;
        expected == bytes.len() as u64
    })
}

fn declared_triangle_count(bytes: &[u8]) -> Option<u32> {
    let field = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([field[0], field[1], field[2], field[3]]))
}

fn starts_with_solid(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..]
        .get(..5)
        .is_some_and(|word| word.eq_ignore_ascii_case(b"solid"))
}

/// Parse STL content already held in memory, detecting the encoding.
///
/// # Errors
///
/// Returns an error if the content is neither valid binary nor valid ASCII
/// STL, including a binary triangle count that exceeds the data present.
pub fn parse_stl(bytes: &[u8]) -> IoResult<TriangleSoup> {
    match classify_stl(bytes) {
        StlClassification::Binary => parse_stl_binary(bytes),
        StlClassification::Ascii => parse_stl_ascii(std::str::from_utf8(bytes)?),
        StlClassification::Malformed { reason } => Err(IoError::invalid_content(reason)),
    }
}

/// Load an STL file, detecting ASCII vs binary encoding.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist, or a format
/// error if the content is not valid STL.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let soup = load_stl("model.stl").unwrap();
/// println!("Loaded {} facets", soup.facet_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<TriangleSoup> {
    let path = path.as_ref();
    let bytes = read_input(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read STL file");
    parse_stl(&bytes)
}

/// Load an STL file and return the bounding box of all its vertices.
///
/// # Errors
///
/// Same as [`load_stl`], plus [`IoError::EmptyMesh`] when the file holds no
/// triangles.
pub fn read_stl_bounds<P: AsRef<Path>>(path: P) -> IoResult<Aabb> {
    let soup = load_stl(path)?;
    let bounds = soup.bounds_opt().ok_or(IoError::EmptyMesh)?;
    info!(
        facets = soup.facet_count(),
        min = ?[bounds.min.x, bounds.min.y, bounds.min.z],
        max = ?[bounds.max.x, bounds.max.y, bounds.max.z],
        "Computed STL bounds"
    );
    Ok(bounds)
}

/// Parse a binary STL held in memory.
fn parse_stl_binary(bytes: &[u8]) -> IoResult<TriangleSoup> {
    let declared = declared_triangle_count(bytes).ok_or_else(|| {
        IoError::invalid_content(format!(
            "binary STL needs at least {PREAMBLE_SIZE} bytes, got {}",
            bytes.len()
        ))
    })?;

    let body = &bytes[PREAMBLE_SIZE..];
    let available = (body.len() / TRIANGLE_SIZE) as u64;
    if available < u64::from(declared) {
        return Err(IoError::Truncated {
            declared,
            available,
        });
    }

    let count = declared as usize;
    let trailing = body.len() - count * TRIANGLE_SIZE;
    if trailing > 0 {
        debug!(trailing, "Ignoring bytes after the last binary STL triangle");
    }

    let mut soup = TriangleSoup::with_capacity(String::new(), count);
    for record in body.chunks_exact(TRIANGLE_SIZE).take(count) {
        let normal = read_vec3(&record[0..12]);
        let v0 = Point3::from(read_vec3(&record[12..24]));
        let v1 = Point3::from(read_vec3(&record[24..36]));
        let v2 = Point3::from(read_vec3(&record[36..48]));
        soup.facets.push(Facet::new(normal, [v0, v1, v2]));
    }

    info!(facets = soup.facet_count(), encoding = "binary", "Parsed STL");
    Ok(soup)
}

/// Read three little-endian f32s from 12 bytes.
fn read_vec3(buf: &[u8]) -> Vector3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vector3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Parse an ASCII STL.
fn parse_stl_ascii(text: &str) -> IoResult<TriangleSoup> {
    let mut soup = TriangleSoup::new(String::new());
    let mut normal: Option<Vector3<f64>> = None;
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);
    let mut saw_solid = false;
    let mut closed = false;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "solid" => {
                saw_solid = true;
                soup.name = parts.collect::<Vec<_>>().join(" ");
            }
            "facet" => {
                if normal.is_some() {
                    return Err(IoError::parse(line_no, "facet opened before endfacet"));
                }
                // "facet normal nx ny nz"
                let coords: Vec<&str> = parts.skip(1).collect();
                let n = if coords.len() >= 3 {
                    parse_triple(&coords, line_no)?
                } else {
                    Vector3::zeros()
                };
                normal = Some(n);
                corners.clear();
            }
            "vertex" => {
                if normal.is_none() {
                    return Err(IoError::parse(line_no, "vertex outside of a facet"));
                }
                let coords: Vec<&str> = parts.collect();
                if coords.len() != 3 {
                    return Err(IoError::parse(
                        line_no,
                        format!("vertex needs 3 coordinates, found {}", coords.len()),
                    ));
                }
                corners.push(Point3::from(parse_triple(&coords, line_no)?));
            }
            "endfacet" => {
                let Some(n) = normal.take() else {
                    return Err(IoError::parse(line_no, "endfacet without facet"));
                };
                let [v0, v1, v2] = corners[..] else {
                    return Err(IoError::parse(
                        line_no,
                        format!("facet has {} vertices, expected 3", corners.len()),
                    ));
                };
                soup.facets.push(Facet::new(n, [v0, v1, v2]));
                corners.clear();
            }
            "endsolid" => {
                closed = true;
                break;
            }
            // "outer loop" / "endloop" carry no data
            _ => {}
        }
    }

    if !saw_solid {
        return Err(IoError::invalid_content("missing `solid` line"));
    }
    if normal.is_some() {
        return Err(IoError::invalid_content("file ends inside a facet"));
    }
    if !closed {
        warn!(name = %soup.name, "ASCII STL has no `endsolid` line");
    }

    info!(facets = soup.facet_count(), encoding = "ascii", "Parsed STL");
    Ok(soup)
}

fn parse_triple(tokens: &[&str], line_no: usize) -> IoResult<Vector3<f64>> {
    let mut values = [0.0_f64; 3];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = token
            .parse()
            .map_err(|_| IoError::parse(line_no, format!("malformed number `{token}`")))?;
    }
    Ok(Vector3::new(values[0], values[1], values[2]))
}

/// Save a surface to an STL file.
///
/// The file is written atomically: either the complete file appears at
/// `path` or nothing is written.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{StlEncoding, load_stl, save_stl};
///
/// let soup = load_stl("input.stl").unwrap();
/// save_stl(&soup, "output_ascii.stl", StlEncoding::Ascii).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(
    soup: &TriangleSoup,
    path: P,
    encoding: StlEncoding,
) -> IoResult<()> {
    let mut buffer = Vec::with_capacity(PREAMBLE_SIZE + soup.facet_count() * TRIANGLE_SIZE);
    match encoding {
        StlEncoding::Binary => write_stl_binary(soup, &mut buffer)?,
        StlEncoding::Ascii => write_stl_ascii(soup, &mut buffer)?,
    }
    write_atomic(path, &buffer)?;
    Ok(())
}

/// Write a surface as binary STL.
///
/// # Errors
///
/// Returns an error if the writer fails or the facet count exceeds `u32`.
pub fn write_stl_binary<W: Write>(soup: &TriangleSoup, mut writer: W) -> IoResult<()> {
    let mut header = [b' '; HEADER_SIZE];
    header[..BINARY_HEADER_TEXT.len()].copy_from_slice(BINARY_HEADER_TEXT);
    writer.write_all(&header)?;

    let count = u32::try_from(soup.facet_count()).map_err(|_| IoError::TooManyFacets {
        count: soup.facet_count(),
    })?;
    writer.write_all(&count.to_le_bytes())?;

    for facet in &soup.facets {
        write_vec3_binary(&mut writer, &facet.normal)?;
        for v in &facet.vertices {
            write_vec3_binary(&mut writer, &v.coords)?;
        }
        // Attribute byte count
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Write a vector as 3 f32s in little-endian.
fn write_vec3_binary<W: Write>(writer: &mut W, v: &Vector3<f64>) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for STL format
    {
        writer.write_all(&(v.x as f32).to_le_bytes())?;
        writer.write_all(&(v.y as f32).to_le_bytes())?;
        writer.write_all(&(v.z as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Write a surface as ASCII STL using the soup's name for the solid.
///
/// Stored normals are written as-is. Numbers use six-digit scientific
/// notation.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_stl_ascii<W: Write>(soup: &TriangleSoup, mut writer: W) -> IoResult<()> {
    let name = &soup.name;
    writeln!(writer, "solid {name}")?;

    for facet in &soup.facets {
        let n = &facet.normal;
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in &facet.vertices {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;

    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::unnecessary_raw_string_hashes
)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_triangle() -> TriangleSoup {
        let mut soup = TriangleSoup::new("tri");
        soup.facets.push(Facet::from_vertices([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]));
        soup
    }

    fn binary_bytes(soup: &TriangleSoup) -> Vec<u8> {
        let mut buffer = Vec::new();
        write_stl_binary(soup, &mut buffer).unwrap();
        buffer
    }

    #[test]
    fn classify_ascii_and_binary() {
        let soup = create_test_triangle();
        let bin = binary_bytes(&soup);
        assert_eq!(bin.len(), PREAMBLE_SIZE + TRIANGLE_SIZE);
        assert_eq!(classify_stl(&bin), StlClassification::Binary);

        let mut text = Vec::new();
        write_stl_ascii(&soup, &mut text).unwrap();
        assert_eq!(classify_stl(&text), StlClassification::Ascii);
    }

    #[test]
    fn classify_binary_with_solid_header() {
        let mut bin = binary_bytes(&create_test_triangle());
        bin[..5].copy_from_slice(b"solid");
        assert_eq!(classify_stl(&bin), StlClassification::Binary);
    }

    #[test]
    fn classify_short_garbage_is_malformed() {
        assert!(matches!(
            classify_stl(b""),
            StlClassification::Malformed { .. }
        ));
        assert!(matches!(
            classify_stl(b"not an stl"),
            StlClassification::Malformed { .. }
        ));
    }

    #[test]
    fn binary_roundtrip_in_memory() {
        let original = create_test_triangle();
        let parsed = parse_stl(&binary_bytes(&original)).unwrap();
        assert_eq!(parsed.facet_count(), 1);
        assert_eq!(parsed.facets[0].vertices, original.facets[0].vertices);
        assert_relative_eq!(parsed.facets[0].normal.z, 1.0, epsilon = 1e-7);
    }

    #[test]
    fn truncated_binary_is_a_format_error() {
        let mut bin = binary_bytes(&create_test_triangle());
        // Claim three triangles while only one is present
        bin[HEADER_SIZE..PREAMBLE_SIZE].copy_from_slice(&3u32.to_le_bytes());
        let err = parse_stl(&bin).unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                declared: 3,
                available: 1
            }
        ));
        assert_eq!(err.category(), mesh_types::ErrorCategory::Format);
    }

    #[test]
    fn binary_trailing_bytes_are_ignored() {
        let mut bin = binary_bytes(&create_test_triangle());
        bin.extend_from_slice(&[0u8; 7]);
        let parsed = parse_stl(&bin).unwrap();
        assert_eq!(parsed.facet_count(), 1);
    }

    #[test]
    fn ascii_stl_parsing() {
        let ascii_stl = r#"solid test part
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test part"#;

        let soup = parse_stl(ascii_stl.as_bytes()).unwrap();
        assert_eq!(soup.name, "test part");
        assert_eq!(soup.facet_count(), 1);
        assert_eq!(soup.facets[0].normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn ascii_malformed_number_reports_line() {
        let ascii_stl = "solid bad\n facet normal 0 0 1\n outer loop\n vertex 0 zero 0\n";
        let err = parse_stl(ascii_stl.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn ascii_facet_with_two_vertices_is_rejected() {
        let ascii_stl = "solid bad\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\nendsolid bad\n";
        let err = parse_stl(ascii_stl.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 7, .. }), "{err}");
    }

    #[test]
    fn ascii_unterminated_facet_is_rejected() {
        let ascii_stl = "solid cut\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\n";
        let err = parse_stl(ascii_stl.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::InvalidContent { .. }));
    }

    #[test]
    fn ascii_writer_layout() {
        let mut text = Vec::new();
        write_stl_ascii(&create_test_triangle(), &mut text).unwrap();
        let text = String::from_utf8(text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "solid tri");
        assert!(lines[1].starts_with("  facet normal "));
        assert_eq!(lines[2], "    outer loop");
        assert!(lines[3].starts_with("      vertex "));
        assert_eq!(lines[8], "endsolid tri");
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn save_and_load_ascii_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.stl");
        save_stl(&create_test_triangle(), &path, StlEncoding::Ascii).unwrap();

        let bounds = read_stl_bounds(&path).unwrap();
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn bounds_of_empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.stl");
        save_stl(&TriangleSoup::new("empty"), &path, StlEncoding::Binary).unwrap();
        assert!(matches!(read_stl_bounds(&path), Err(IoError::EmptyMesh)));
    }
}

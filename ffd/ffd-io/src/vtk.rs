//! VTK XML writers for ParaView.
//!
//! - [`write_vts`]: a lattice as a `StructuredGrid` (`.vts`)
//! - [`write_vtp`]: a control-point snapshot as `PolyData` (`.vtp`) with one
//!   vertex cell per point and its lattice indices as point data
//! - [`write_pvd`]: a `Collection` (`.pvd`) tying `.vtp` files to timesteps
//!
//! All arrays are written in ASCII.

use std::io::Write;

use ffd_grid::StructuredGrid;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::control_points::ControlPoint;
use crate::error::{FfdIoError, FfdIoResult};

/// One entry of a `.pvd` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvdEntry {
    /// Timestep value shown in ParaView.
    pub timestep: i64,
    /// Data file, relative to the `.pvd` file.
    pub file: String,
}

/// Thin wrapper over the quick-xml writer that maps errors once.
struct XmlDoc<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlDoc<W> {
    fn new(out: W) -> FfdIoResult<Self> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(|e| FfdIoError::encode(format!("failed to write XML declaration: {e}")))?;
        Ok(Self { writer })
    }

    fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
        let mut start = BytesStart::new(name);
        for &attr in attrs {
            start.push_attribute(attr);
        }
        start
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> FfdIoResult<()> {
        self.writer
            .write_event(Event::Start(Self::element(name, attrs)))
            .map_err(|e| FfdIoError::encode(format!("failed to write {name} element: {e}")))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> FfdIoResult<()> {
        self.writer
            .write_event(Event::Empty(Self::element(name, attrs)))
            .map_err(|e| FfdIoError::encode(format!("failed to write {name} element: {e}")))
    }

    fn close(&mut self, name: &str) -> FfdIoResult<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| FfdIoError::encode(format!("failed to close {name}: {e}")))
    }

    fn data_array(&mut self, attrs: &[(&str, &str)], values: &str) -> FfdIoResult<()> {
        self.open("DataArray", attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(values)))
            .map_err(|e| FfdIoError::encode(format!("failed to write array data: {e}")))?;
        self.close("DataArray")
    }

    fn finish(self) -> FfdIoResult<()> {
        let mut out = self.writer.into_inner();
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

fn join<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write a lattice as a VTK XML `StructuredGrid`.
///
/// `WholeExtent` is `0 nx-1 0 ny-1 0 nz-1`; points are interleaved `x y z`
/// triples in flat order, written with full precision as `Float64`.
///
/// # Errors
///
/// [`FfdIoError::Encode`] or [`FfdIoError::Io`] if writing fails.
///
/// # Example
///
/// ```
/// use ffd_grid::{OffsetBoxParams, generate_offset_box};
/// use ffd_io::write_vts;
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
/// let grid = generate_offset_box(&aabb, &OffsetBoxParams::default()).unwrap();
///
/// let mut out = Vec::new();
/// write_vts(&grid, &mut out).unwrap();
/// let xml = String::from_utf8(out).unwrap();
/// assert!(xml.contains(r#"WholeExtent="0 10 0 1 0 1""#));
/// ```
pub fn write_vts<W: Write>(grid: &StructuredGrid, out: W) -> FfdIoResult<()> {
    let dims = grid.dims();
    let extent = format!(
        "0 {} 0 {} 0 {}",
        dims.nx() - 1,
        dims.ny() - 1,
        dims.nz() - 1
    );
    let points = join(
        grid.points()
            .map(|p| format!("{} {} {}", p.x, p.y, p.z)),
    );

    let mut doc = XmlDoc::new(out)?;
    doc.open(
        "VTKFile",
        &[
            ("type", "StructuredGrid"),
            ("version", "1.0"),
            ("byte_order", "LittleEndian"),
            ("header_type", "UInt64"),
        ],
    )?;
    doc.open("StructuredGrid", &[("WholeExtent", extent.as_str())])?;
    doc.open("Piece", &[("Extent", extent.as_str())])?;
    doc.open("Points", &[])?;
    doc.data_array(
        &[
            ("type", "Float64"),
            ("Name", "Points"),
            ("NumberOfComponents", "3"),
            ("format", "ascii"),
        ],
        &points,
    )?;
    doc.close("Points")?;
    doc.close("Piece")?;
    doc.close("StructuredGrid")?;
    doc.close("VTKFile")?;
    doc.finish()
}

/// Write control points as VTK XML `PolyData`.
///
/// Each point becomes one vertex cell. Point data carries `i_index`,
/// `j_index`, `k_index` and `point_id` as `Int32`, and the activity flags as
/// a three-component `Float32` array named `active`.
///
/// # Errors
///
/// [`FfdIoError::Encode`] or [`FfdIoError::Io`] if writing fails.
pub fn write_vtp<W: Write>(points: &[ControlPoint], out: W) -> FfdIoResult<()> {
    let n = points.len();
    let count = n.to_string();

    let mut doc = XmlDoc::new(out)?;
    doc.open(
        "VTKFile",
        &[
            ("type", "PolyData"),
            ("version", "1.0"),
            ("byte_order", "LittleEndian"),
            ("header_type", "UInt64"),
        ],
    )?;
    doc.open("PolyData", &[])?;
    doc.open(
        "Piece",
        &[
            ("NumberOfPoints", count.as_str()),
            ("NumberOfVerts", count.as_str()),
            ("NumberOfLines", "0"),
            ("NumberOfStrips", "0"),
            ("NumberOfPolys", "0"),
        ],
    )?;

    doc.open("Points", &[])?;
    doc.data_array(
        &[
            ("type", "Float32"),
            ("Name", "Points"),
            ("NumberOfComponents", "3"),
            ("format", "ascii"),
        ],
        &join(points.iter().map(|p| {
            format!(
                "{:.6} {:.6} {:.6}",
                p.position.x, p.position.y, p.position.z
            )
        })),
    )?;
    doc.close("Points")?;

    doc.open("Verts", &[])?;
    doc.data_array(
        &[("type", "Int32"), ("Name", "connectivity"), ("format", "ascii")],
        &join(0..n),
    )?;
    doc.data_array(
        &[("type", "Int32"), ("Name", "offsets"), ("format", "ascii")],
        &join(1..=n),
    )?;
    doc.close("Verts")?;

    doc.open("PointData", &[])?;
    for (axis, name) in ["i_index", "j_index", "k_index"].into_iter().enumerate() {
        doc.data_array(
            &[("type", "Int32"), ("Name", name), ("format", "ascii")],
            &join(points.iter().map(|p| p.index[axis])),
        )?;
    }
    doc.data_array(
        &[("type", "Int32"), ("Name", "point_id"), ("format", "ascii")],
        &join(0..n),
    )?;
    doc.data_array(
        &[
            ("type", "Float32"),
            ("Name", "active"),
            ("NumberOfComponents", "3"),
            ("format", "ascii"),
        ],
        &join(
            points
                .iter()
                .map(|p| format!("{:.1} {:.1} {:.1}", p.active.x, p.active.y, p.active.z)),
        ),
    )?;
    doc.close("PointData")?;

    doc.close("Piece")?;
    doc.close("PolyData")?;
    doc.close("VTKFile")?;
    doc.finish()
}

/// Write a `.pvd` collection indexing data files by timestep.
///
/// # Errors
///
/// [`FfdIoError::Encode`] or [`FfdIoError::Io`] if writing fails.
pub fn write_pvd<W: Write>(entries: &[PvdEntry], out: W) -> FfdIoResult<()> {
    let mut doc = XmlDoc::new(out)?;
    doc.open(
        "VTKFile",
        &[
            ("type", "Collection"),
            ("version", "0.1"),
            ("byte_order", "LittleEndian"),
        ],
    )?;
    doc.open("Collection", &[])?;
    for entry in entries {
        let timestep = entry.timestep.to_string();
        doc.empty(
            "DataSet",
            &[
                ("timestep", timestep.as_str()),
                ("group", ""),
                ("part", "0"),
                ("file", entry.file.as_str()),
            ],
        )?;
    }
    doc.close("Collection")?;
    doc.close("VTKFile")?;
    doc.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ffd_grid::{CornerSet, GridDims, generate_from_corners};
    use mesh_types::{Aabb, Point3, Vector3};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> FfdIoResult<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample_points() -> Vec<ControlPoint> {
        vec![
            ControlPoint {
                position: Point3::new(0.0, 0.5, 1.0),
                index: [0, 0, 0],
                active: Vector3::new(1.0, 0.0, 0.0),
            },
            ControlPoint {
                position: Point3::new(1.25, 0.5, 1.0),
                index: [1, 0, 2],
                active: Vector3::new(0.0, 1.0, 1.0),
            },
        ]
    }

    #[test]
    fn vts_layout() {
        let aabb = Aabb::new(Point3::origin(), Point3::new(2.0, 1.0, 1.0));
        let corners = CornerSet::from_aabb(&aabb).unwrap();
        let grid = generate_from_corners(
            &corners,
            GridDims::new(3, 2, 2).unwrap(),
        );
        let xml = render(|out| write_vts(&grid, out));
        assert!(xml.starts_with(r#"<?xml version="1.0"?>"#));
        assert!(xml.contains(r#"<VTKFile type="StructuredGrid""#));
        assert!(xml.contains(r#"<StructuredGrid WholeExtent="0 2 0 1 0 1">"#));
        assert!(xml.contains(r#"<Piece Extent="0 2 0 1 0 1">"#));
        assert!(xml.contains(r#"type="Float64""#));
        assert!(xml.contains(">0 0 0 1 0 0 2 0 0 0 1 0 "));
        assert!(xml.trim_end().ends_with("</VTKFile>"));
    }

    #[test]
    fn vtp_arrays() {
        let xml = render(|out| write_vtp(&sample_points(), out));
        assert!(xml.contains(r#"NumberOfPoints="2" NumberOfVerts="2""#));
        assert!(xml.contains(">0.000000 0.500000 1.000000 1.250000 0.500000 1.000000<"));
        assert!(xml.contains(r#"Name="connectivity" format="ascii">0 1<"#));
        assert!(xml.contains(r#"Name="offsets" format="ascii">1 2<"#));
        assert!(xml.contains(r#"Name="i_index" format="ascii">0 1<"#));
        assert!(xml.contains(r#"Name="k_index" format="ascii">0 2<"#));
        assert!(xml.contains(r#"Name="point_id" format="ascii">0 1<"#));
        assert!(xml.contains(">1.0 0.0 0.0 0.0 1.0 1.0<"));
    }

    #[test]
    fn pvd_entries() {
        let entries = [
            PvdEntry {
                timestep: 0,
                file: "cp_t0000.vtp".to_string(),
            },
            PvdEntry {
                timestep: 5,
                file: "cp_t0005.vtp".to_string(),
            },
        ];
        let xml = render(|out| write_pvd(&entries, out));
        assert!(xml.contains(r#"<VTKFile type="Collection" version="0.1" byte_order="LittleEndian">"#));
        assert!(xml.contains(r#"<DataSet timestep="5" group="" part="0" file="cp_t0005.vtp"/>"#));
        assert_eq!(xml.matches("<DataSet ").count(), 2);
    }

    #[test]
    fn file_names_are_escaped() {
        let entries = [PvdEntry {
            timestep: 1,
            file: "a&b.vtp".to_string(),
        }];
        let xml = render(|out| write_pvd(&entries, out));
        assert!(xml.contains(r#"file="a&amp;b.vtp""#));
    }
}

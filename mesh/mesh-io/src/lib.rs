//! STL file I/O for the FFD toolkit.
//!
//! This crate reads and writes triangle surfaces in both STL encodings and
//! extracts their bounding boxes:
//!
//! - [`classify_stl`] sniffs the leading bytes and returns
//!   [`StlClassification::Binary`], [`StlClassification::Ascii`] or
//!   [`StlClassification::Malformed`]
//! - [`load_stl`] / [`parse_stl`] decode either encoding into a
//!   [`TriangleSoup`](mesh_types::TriangleSoup)
//! - [`read_stl_bounds`] returns the [`Aabb`](mesh_types::Aabb) of every vertex
//! - [`save_stl`] writes either encoding through [`write_atomic`], so a failed
//!   run never leaves a half-written file behind
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{StlEncoding, load_stl, save_stl};
//!
//! // Binary or ASCII, detected from content
//! let soup = load_stl("model.stl").unwrap();
//!
//! // Write it back as text
//! save_stl(&soup, "model.ascii.stl", StlEncoding::Ascii).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod atomic;
mod error;
mod stl;

pub use atomic::{write_atomic, write_atomic_all};
pub use error::{IoError, IoResult};
pub use stl::{
    StlClassification, StlEncoding, classify_stl, load_stl, parse_stl, read_stl_bounds,
    save_stl, write_stl_ascii, write_stl_binary,
};

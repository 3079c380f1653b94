//! Zip bundles of generated files.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use mesh_io::write_atomic;
use tracing::info;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{FfdIoError, FfdIoResult, not_found_or_io};

/// Pack files into a deflated zip archive, stored by base name.
///
/// The archive is assembled in memory and written atomically.
///
/// # Errors
///
/// - [`FfdIoError::FileNotFound`] if an input file is missing
/// - [`FfdIoError::Encode`] if the archive cannot be built
/// - [`FfdIoError::Io`] if the archive cannot be written
pub fn write_zip_bundle<P: AsRef<Path>>(archive: P, files: &[PathBuf]) -> FfdIoResult<()> {
    let archive = archive.as_ref();
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FfdIoError::malformed(format!("unusable file name: {}", file.display())))?;
        let contents = std::fs::read(file).map_err(|e| not_found_or_io(e, file))?;
        entries.push((name.to_string(), contents));
    }

    let buffer = zip_entries(&entries)?;
    write_atomic(archive, &buffer)?;
    info!(path = %archive.display(), entries = files.len(), "wrote archive");
    Ok(())
}

/// Deflated zip archive of named in-memory entries, in order.
pub(crate) fn zip_entries(entries: &[(String, Vec<u8>)]) -> FfdIoResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, contents) in entries {
        zip.start_file(name.as_str(), options)
            .map_err(|e| FfdIoError::encode(format!("failed to add {name} to archive: {e}")))?;
        zip.write_all(contents)?;
    }

    Ok(zip
        .finish()
        .map_err(|e| FfdIoError::encode(format!("failed to finalize ZIP archive: {e}")))?
        .into_inner())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn bundles_by_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pvd");
        let b = dir.path().join("b_t0001.vtp");
        std::fs::write(&a, "collection").unwrap();
        std::fs::write(&b, "polydata").unwrap();

        let zip_path = dir.path().join("bundle.zip");
        write_zip_bundle(&zip_path, &[a, b]).unwrap();

        let file = std::fs::File::open(&zip_path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        assert_eq!(archive.len(), 2);
        let mut entry = archive.by_name("b_t0001.vtp").unwrap();
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        assert_eq!(text, "polydata");
        assert_eq!(entry.compression(), zip::CompressionMethod::Deflated);
    }

    #[test]
    fn in_memory_entries_are_archived() {
        let bytes = zip_entries(&[
            ("series.pvd".to_string(), b"collection".to_vec()),
            ("series_t0001.vtp".to_string(), b"polydata".to_vec()),
        ])
        .unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"series.pvd"));
        assert!(names.contains(&"series_t0001.vtp"));
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("bundle.zip");
        let err = write_zip_bundle(&zip_path, &[dir.path().join("gone.vtp")]).err();
        assert!(matches!(err, Some(FfdIoError::FileNotFound { .. })));
        assert!(!zip_path.exists());
    }
}

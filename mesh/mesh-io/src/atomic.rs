//! All-or-nothing file output.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Write `contents` to `path` so that readers never observe a partial file.
///
/// The bytes go to a temporary file in the destination directory, which is
/// flushed and then renamed over `path`. If anything fails the temporary file
/// is removed and `path` is left untouched.
///
/// # Errors
///
/// Returns any I/O error from creating, writing or renaming the file.
///
/// # Example
///
/// ```no_run
/// mesh_io::write_atomic("out/FFD.xyz", b"1\n2 2 2\n").unwrap();
/// ```
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> std::io::Result<()> {
    let path = path.as_ref();
    stage(path, contents)?.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write a set of files so that either all of them land or none of the new
/// ones do.
///
/// Every file is first written and flushed to a temporary next to its
/// destination. Only when all of them are staged are they renamed into
/// place. If a rename fails, destinations created earlier in the same call
/// are removed again; files that already existed keep their new contents.
///
/// # Errors
///
/// Returns the first I/O error from staging or renaming.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
///
/// mesh_io::write_atomic_all(&[
///     (PathBuf::from("out/a.vtp"), b"<a/>".to_vec()),
///     (PathBuf::from("out/b.vtp"), b"<b/>".to_vec()),
/// ])
/// .unwrap();
/// ```
pub fn write_atomic_all(files: &[(PathBuf, Vec<u8>)]) -> std::io::Result<()> {
    let staged = files
        .iter()
        .map(|(path, contents)| -> std::io::Result<_> {
            let existed = path.exists();
            Ok((path.as_path(), existed, stage(path, contents)?))
        })
        .collect::<std::io::Result<Vec<_>>>()?;

    let mut created = Vec::new();
    for (path, existed, file) in staged {
        if let Err(e) = file.persist(path) {
            for path in created {
                let _ = std::fs::remove_file(path);
            }
            return Err(e.error);
        }
        if !existed {
            created.push(path);
        }
    }
    Ok(())
}

/// Flushed temporary file holding `contents`, in the directory of `path`.
fn stage(path: &Path, contents: &[u8]) -> std::io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    Ok(file)
}

use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::constants::VCS_DIR;
use crate::error::{Error, Result};

/// Returns true when `dir` does not exist or contains nothing but a version-control directory.
pub fn is_empty_dir<P: AsRef<Path>>(dir: P) -> Result<bool> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(true);
    }
    for entry in std::fs::read_dir(dir)? {
        if entry?.file_name() != VCS_DIR {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Ensures the output directory is safe to materialize into.
pub fn ensure_empty_output_dir<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    if !is_empty_dir(output_dir)? {
        return Err(Error::OutputDirectoryNotEmptyError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(())
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    std::fs::create_dir_all(dest_path.as_ref()).map_err(Error::IoError)
}

/// Writes `data` to `dest_path` through a temporary file in the same directory,
/// so the destination either holds the full buffer or is left untouched.
fn persist_atomically(dest_path: &Path, data: &[u8], permissions: Permissions) -> Result<()> {
    let dir = dest_path.parent().unwrap_or(Path::new("."));
    create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(dest_path).map_err(|e| Error::IoError(e.error))?;
    Ok(())
}

/// Writes `data` to `dest_path` atomically with the permissions of `source_path`.
pub fn atomic_write<P: AsRef<Path>>(source_path: P, dest_path: P, data: &[u8]) -> Result<()> {
    let permissions = std::fs::metadata(source_path.as_ref())?.permissions();
    persist_atomically(dest_path.as_ref(), data, permissions)
}

/// Copies raw bytes and permissions of `source_path` to `dest_path` atomically.
pub fn atomic_copy<P: AsRef<Path>>(source_path: P, dest_path: P) -> Result<()> {
    let source_path = source_path.as_ref();
    let data = std::fs::read(source_path)?;
    let permissions = std::fs::metadata(source_path)?.permissions();
    persist_atomically(dest_path.as_ref(), &data, permissions)
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

//! Opening `.nc` files, directly or out of a `.zip` archive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::IoError;

/// An open NetCDF file.
///
/// When opened from a zip archive the extracted member lives in a scratch
/// directory that is removed on drop, after the file handle is closed.
pub(crate) struct Dataset {
    // Field order matters: the handle must drop before the scratch dir.
    file: netcdf::File,
    path: PathBuf,
    _scratch: Option<TempDir>,
}

impl Dataset {
    pub(crate) fn open(path: &Path) -> Result<Self, IoError> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        if is_zip(path) {
            let scratch = TempDir::new().map_err(|e| archive_error(path, &e))?;
            let member = extract_first_nc(path, scratch.path())?;
            debug!(archive = %path.display(), member = %member.display(), "extracted netcdf member");
            let file = netcdf::open(&member)?;
            return Ok(Self {
                file,
                path: path.to_path_buf(),
                _scratch: Some(scratch),
            });
        }

        Ok(Self {
            file: netcdf::open(path)?,
            path: path.to_path_buf(),
            _scratch: None,
        })
    }

    pub(crate) fn file(&self) -> &netcdf::File {
        &self.file
    }

    /// Path as given by the caller (the archive, for zipped files).
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Extract the first member ending in `.nc` into `dir` and return its path.
fn extract_first_nc(archive_path: &Path, dir: &Path) -> Result<PathBuf, IoError> {
    let reader = fs::File::open(archive_path).map_err(|e| archive_error(archive_path, &e))?;
    let mut archive =
        zip::ZipArchive::new(reader).map_err(|e| archive_error(archive_path, &e))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| archive_error(archive_path, &e))?;
        if entry.is_dir() || !entry.name().ends_with(".nc") {
            continue;
        }
        // Flatten the member name so nothing escapes the scratch dir.
        let file_name = Path::new(entry.name())
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| IoError::Archive {
                path: archive_path.to_path_buf(),
                reason: format!("bad member name '{}'", entry.name()),
            })?;
        let target = dir.join(file_name);
        let mut out = fs::File::create(&target).map_err(|e| archive_error(archive_path, &e))?;
        io::copy(&mut entry, &mut out).map_err(|e| archive_error(archive_path, &e))?;
        return Ok(target);
    }

    Err(IoError::EmptyArchive {
        path: archive_path.to_path_buf(),
    })
}

fn archive_error(path: &Path, e: &dyn std::fmt::Display) -> IoError {
    IoError::Archive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_extension_is_case_insensitive() {
        assert!(is_zip(Path::new("a/b.ZIP")));
        assert!(is_zip(Path::new("b.zip")));
        assert!(!is_zip(Path::new("b.nc")));
        assert!(!is_zip(Path::new("zip")));
    }

    #[test]
    fn missing_file() {
        let result = Dataset::open(Path::new("/tmp/clima_test_nonexistent_file.nc"));
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}

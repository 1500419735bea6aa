use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ensures the output directory is safe to write to.
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Converts a path to a str, failing on non-UTF-8 paths.
pub fn path_to_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::ProcessError {
        source_path: path.display().to_string(),
        e: "path is not valid UTF-8".to_string(),
    })
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    std::fs::create_dir_all(dest_path.as_ref()).map_err(Error::IoError)
}

/// Copies a file, creating the destination's parent directories as needed.
pub fn copy_file<P: AsRef<Path>>(source_path: P, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(source_path.as_ref(), dest_path).map(|_| ()).map_err(Error::IoError)
}

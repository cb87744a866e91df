//! Input path resolution

use lightgbm_score_types::{ConfigError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolve an input argument to a single file.
///
/// A file path is returned unchanged. A directory must hold exactly one
/// regular file at its top level, which is returned instead.
pub fn input_file_path(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if !path.is_dir() {
        return Err(ConfigError::InputNotFound(path.to_path_buf()).into());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    match files.len() {
        0 => Err(ConfigError::EmptyInputDirectory(path.to_path_buf()).into()),
        1 => Ok(files.remove(0)),
        count => Err(ConfigError::AmbiguousInputDirectory {
            dir: path.to_path_buf(),
            count,
        }
        .into()),
    }
}

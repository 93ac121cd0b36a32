//! Shared RON definition loading.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::DataLoadError;

/// List every `.ron` file in `dir` as `(file stem, path)`, sorted by stem.
pub fn definition_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, DataLoadError> {
    if !dir.exists() {
        return Err(DataLoadError::DirectoryNotFound(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut files: Vec<(String, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .map(|path| {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();
            (stem, path)
        })
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Read and parse a single RON definition file.
pub fn parse_definition<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

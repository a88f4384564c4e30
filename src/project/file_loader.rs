//! Source file loading and directory traversal.
//!
//! Files are read as bytes and decoded lossily so that a stray encoding
//! problem never makes a classpath root unusable.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::LoadError;
use crate::model::{FileModel, FileStamp};
use crate::parser::parse_source;

/// Returns true if `path` has the given extension (`.as` or `as`), ignoring case.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

/// Validate that `path` is a source file of the given extension.
pub fn validate_extension(path: &Path, extension: &str) -> Result<(), LoadError> {
    if has_extension(path, extension) {
        Ok(())
    } else {
        Err(LoadError::UnsupportedExtension(path.to_path_buf()))
    }
}

/// Current on-disk stamp of a file.
pub fn file_stamp(path: &Path) -> Result<FileStamp, LoadError> {
    std::fs::metadata(path)
        .map(|m| FileStamp::from_metadata(&m))
        .map_err(|e| LoadError::io(path, e))
}

/// Load file contents together with the stamp they were read at.
pub fn load_file(path: &Path) -> Result<(String, FileStamp), LoadError> {
    let stamp = file_stamp(path)?;
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    Ok((text, stamp))
}

/// Load and parse a source file.
///
/// Syntax problems do not fail the load: they are logged and the partial
/// model is returned.
pub fn parse_file(path: &Path) -> Result<FileModel, LoadError> {
    let (text, stamp) = load_file(path)?;
    let result = parse_source(&text, path);
    if result.has_errors() {
        tracing::debug!(
            "[MODEL] {} parsed with {} error(s), first: {}",
            path.display(),
            result.errors.len(),
            result.errors[0]
        );
    }
    let mut model = result.model;
    model.stamp = Some(stamp);
    Ok(model)
}

/// Collect all source files under `root`, in file-name order.
///
/// Directories named in `excluded` and hidden directories (starting with a
/// dot) are not entered.
pub fn collect_file_paths(
    root: &Path,
    extension: &str,
    excluded: &[String],
) -> Result<Vec<PathBuf>, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('.') && !excluded.iter().any(|x| *x == name)
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                return Err(LoadError::io(path, source));
            }
            Err(e) => {
                tracing::debug!("[CLASSPATH] skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

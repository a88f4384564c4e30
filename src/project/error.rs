//! Errors raised at the filesystem boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading classpath roots and source files.
///
/// These never escape the resolver: a failing root is marked invalid and
/// lookups degrade to the void sentinel.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error while reading a file or listing a directory.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A classpath root that is missing or not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A file that is not a source file of the current dialect.
    #[error("Unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),
}

impl LoadError {
    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

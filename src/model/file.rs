//! Parsed file models.

use smol_str::SmolStr;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::class::ClassModel;
use super::member::MemberList;

/// Identity of an observed on-disk version of a file.
///
/// Two stamps compare equal when neither the modification time nor the
/// length changed, in which case the cached model is reused as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileStamp {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileStamp {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        }
    }
}

/// The model of one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileModel {
    /// Absolute path (empty for virtual models).
    pub path: PathBuf,
    /// Declared package (empty for the root package).
    pub package: SmolStr,
    /// True if the package was declared explicitly (`package x {}` or `class x.Name`).
    pub has_package: bool,
    /// 1 = script code, 2 = AS2 class file, 3 = package file.
    pub version: u32,
    /// Import declarations exactly as written; never mutated by resolution.
    pub imports: MemberList,
    pub classes: Vec<Arc<ClassModel>>,
    /// Package-level declarations.
    pub members: MemberList,
    /// First line of the private section (0 when the file has none).
    pub private_section_index: u32,
    /// Stamp of the file content this model was parsed from.
    pub stamp: Option<FileStamp>,
    /// Set on the shared model of files the context must not resolve against.
    pub ignored: bool,
}

impl FileModel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            version: 1,
            ..Self::default()
        }
    }

    /// A model for files outside the language (e.g. non-source documents).
    pub fn ignore() -> Self {
        Self {
            ignored: true,
            ..Self::default()
        }
    }

    /// The main type of the file: the first non-private class declared
    /// before the private section, or the void sentinel.
    pub fn public_class(&self) -> Arc<ClassModel> {
        self.classes
            .iter()
            .find(|c| !c.access.contains(super::Visibility::PRIVATE) && !self.in_private_section(c.span.start.line))
            .cloned()
            .unwrap_or_else(ClassModel::void)
    }

    /// Returns true if `line` belongs to the private section.
    pub fn in_private_section(&self, line: u32) -> bool {
        self.private_section_index > 0 && line >= self.private_section_index
    }

    /// The class whose declaration contains `line`, or the void sentinel.
    pub fn class_at_line(&self, line: u32) -> Arc<ClassModel> {
        self.classes
            .iter()
            .find(|c| c.span.contains_line(line))
            .cloned()
            .unwrap_or_else(ClassModel::void)
    }

    /// File name without directory and extension.
    pub fn module_name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// The directory this file's package is relative to.
    ///
    /// Returns `None` when the directory layout does not match the package.
    pub fn base_path(&self) -> Option<PathBuf> {
        let mut dir: &Path = self.path.parent()?;
        if self.package.is_empty() {
            return Some(dir.to_path_buf());
        }
        for segment in self.package.rsplit('.') {
            if dir.file_name().and_then(|n| n.to_str()) != Some(segment) {
                return None;
            }
            dir = dir.parent()?;
        }
        Some(dir.to_path_buf())
    }
}

//! Ordered classpath roots.

use rustc_hash::FxHashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::path_model::PathModel;

/// Normalize a root path for comparison: drops `.` components and trailing separators.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Shared registry of root models, so rebuilding a classpath keeps the
/// already parsed files of directories that stay registered.
#[derive(Debug, Default)]
pub struct PathRegistry {
    models: FxHashMap<PathBuf, Arc<PathModel>>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing model for this directory, or a fresh one.
    pub fn get_or_create(&mut self, path: &Path) -> Arc<PathModel> {
        let key = normalize_path(path);
        Arc::clone(
            self.models
                .entry(key.clone())
                .or_insert_with(|| Arc::new(PathModel::new(key))),
        )
    }

    pub fn get(&self, path: &Path) -> Option<Arc<PathModel>> {
        self.models.get(&normalize_path(path)).cloned()
    }

    /// Drop models for directories that `classpath` no longer registers.
    pub fn retain_roots(&mut self, classpath: &ClassPath) {
        let before = self.models.len();
        self.models.retain(|path, _| classpath.contains(path));
        if self.models.len() < before {
            tracing::debug!("[CLASSPATH] released {} unused root(s)", before - self.models.len());
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Classpath roots in registration order.
///
/// A temporary root, when present, always comes first.
#[derive(Clone, Debug, Default)]
pub struct ClassPath {
    roots: Vec<Arc<PathModel>>,
}

impl ClassPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> &[Arc<PathModel>] {
        &self.roots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<PathModel>> {
        self.roots.iter()
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }

    /// Returns true if a root for this directory is registered.
    pub fn contains(&self, path: &Path) -> bool {
        let key = normalize_path(path);
        self.roots.iter().any(|r| r.path() == key)
    }

    /// Append a root unless the same directory is already registered.
    ///
    /// Returns false for duplicates.
    pub fn add(&mut self, model: Arc<PathModel>) -> bool {
        if self.roots.iter().any(|r| r.path() == model.path()) {
            return false;
        }
        tracing::debug!(
            "[CLASSPATH] add root {} (valid={})",
            model.path().display(),
            model.is_valid()
        );
        self.roots.push(model);
        true
    }

    /// The temporary root, if any.
    pub fn temporary(&self) -> Option<&Arc<PathModel>> {
        self.roots.first().filter(|r| r.is_temporary())
    }

    /// Install `model` as the temporary root, replacing the previous one.
    ///
    /// Nothing is inserted when the directory is already a regular root.
    pub fn insert_temporary(&mut self, model: Arc<PathModel>) -> bool {
        self.remove_temporary();
        if self.roots.iter().any(|r| r.path() == model.path()) {
            return false;
        }
        tracing::debug!("[CLASSPATH] temporary root {}", model.path().display());
        self.roots.insert(0, model);
        true
    }

    pub fn remove_temporary(&mut self) -> Option<Arc<PathModel>> {
        if self.temporary().is_some() {
            Some(self.roots.remove(0))
        } else {
            None
        }
    }

    /// Roots usable for lookups: valid and not being rebuilt, in order.
    pub fn searchable(&self) -> impl Iterator<Item = &Arc<PathModel>> {
        self.roots.iter().filter(|r| r.is_valid() && !r.is_updating())
    }

    /// The most specific root containing `file`.
    pub fn find_root_for(&self, file: &Path) -> Option<&Arc<PathModel>> {
        self.roots
            .iter()
            .filter(|r| r.contains_path(file))
            .max_by_key(|r| r.path().components().count())
    }
}

//! A classpath root and its cache of parsed file models.
//!
//! A `PathModel` is shared (`Arc`) between the classpath and every context
//! that registers the same directory, so a file parsed for one lookup is
//! reused by all later ones. Cached models are immutable; a changed file is
//! replaced by a new `Arc<FileModel>`, never edited in place.

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::LoadError;
use super::file_loader;
use crate::model::{FileModel, FileStamp};

#[derive(Debug)]
struct PathState {
    valid: bool,
    updating: bool,
    explored: bool,
    invalid_reason: Option<String>,
    /// Cached models keyed by absolute path, in discovery order.
    files: IndexMap<PathBuf, Arc<FileModel>>,
    /// Directory names skipped by exploration.
    excluded: Vec<String>,
}

/// Entries found by listing a package directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryEntries {
    /// Sub-directory names.
    pub packages: Vec<String>,
    /// Source file names without extension.
    pub modules: Vec<String>,
}

/// One classpath root.
#[derive(Debug)]
pub struct PathModel {
    path: PathBuf,
    temporary: bool,
    state: RwLock<PathState>,
    /// Serializes on-demand parses so a stale file is parsed by one caller.
    parse_lock: Mutex<()>,
    parse_count: AtomicUsize,
}

impl PathModel {
    /// Create a root for `path`. A missing directory starts out invalid.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(path.into(), false)
    }

    /// Create a temporary root (inferred for a file outside the classpath).
    pub fn temporary(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(path.into(), true)
    }

    fn with_kind(path: PathBuf, temporary: bool) -> Self {
        let valid = path.is_dir();
        if !valid {
            tracing::debug!("[CLASSPATH] root {} does not exist", path.display());
        }
        Self {
            state: RwLock::new(PathState {
                valid,
                updating: false,
                explored: false,
                invalid_reason: (!valid).then(|| "directory not found".to_string()),
                files: IndexMap::new(),
                excluded: Vec::new(),
            }),
            path,
            temporary,
            parse_lock: Mutex::new(()),
            parse_count: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    pub fn is_valid(&self) -> bool {
        self.state.read().valid
    }

    /// True while an exploration is rebuilding the cache.
    pub fn is_updating(&self) -> bool {
        self.state.read().updating
    }

    pub fn was_explored(&self) -> bool {
        self.state.read().explored
    }

    pub fn invalid_reason(&self) -> Option<String> {
        self.state.read().invalid_reason.clone()
    }

    /// Number of files parsed through this root since creation.
    pub fn parse_count(&self) -> usize {
        self.parse_count.load(Ordering::Relaxed)
    }

    // ========================================================================
    // VALIDITY
    // ========================================================================

    /// Mark the root invalid: it is skipped by lookups until [`revalidate`](Self::revalidate).
    pub fn invalidate(&self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!("[CLASSPATH] root {} invalidated: {}", self.path.display(), reason);
        let mut state = self.state.write();
        state.valid = false;
        state.invalid_reason = Some(reason);
    }

    /// Re-check the root directory. Returns the new validity.
    pub fn revalidate(&self) -> bool {
        let valid = self.path.is_dir();
        let mut state = self.state.write();
        state.valid = valid;
        state.invalid_reason = (!valid).then(|| "directory not found".to_string());
        tracing::debug!("[CLASSPATH] root {} revalidated: valid={}", self.path.display(), valid);
        valid
    }

    // ========================================================================
    // FILE CACHE
    // ========================================================================

    /// Cached model for an absolute path, without touching the disk.
    pub fn try_get_file(&self, path: &Path) -> Option<Arc<FileModel>> {
        self.state.read().files.get(path).cloned()
    }

    pub fn has_file(&self, path: &Path) -> bool {
        self.state.read().files.contains_key(path)
    }

    /// Add or replace a cached model (keyed by its path).
    pub fn add_file(&self, model: Arc<FileModel>) {
        self.state.write().files.insert(model.path.clone(), model);
    }

    pub fn remove_file(&self, path: &Path) -> Option<Arc<FileModel>> {
        self.state.write().files.shift_remove(path)
    }

    /// Snapshot of the cached models, in discovery order.
    pub fn files(&self) -> Vec<Arc<FileModel>> {
        self.state.read().files.values().cloned().collect()
    }

    pub fn file_count(&self) -> usize {
        self.state.read().files.len()
    }

    /// Visit cached models in order; the first `Some` wins.
    pub fn find_file<T>(&self, mut f: impl FnMut(&Arc<FileModel>) -> Option<T>) -> Option<T> {
        self.files().iter().find_map(|model| f(model))
    }

    /// Returns true if `path` lies under this root.
    pub fn contains_path(&self, path: &Path) -> bool {
        path.starts_with(&self.path)
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Model of a file relative to the root, loading it if needed.
    pub fn locate(&self, relative: &Path) -> Result<Option<Arc<FileModel>>, LoadError> {
        self.load(&self.path.join(relative))
    }

    /// Model of an absolute file path.
    ///
    /// The cached model is returned when the on-disk stamp is unchanged, so a
    /// file is parsed at most once per observed modification, also when
    /// several threads ask for it at once. A missing file
    /// yields `Ok(None)` (and drops a stale cache entry). Any other IO failure
    /// invalidates the root.
    pub fn load(&self, path: &Path) -> Result<Option<Arc<FileModel>>, LoadError> {
        if !self.is_valid() {
            return Ok(None);
        }
        let cached = self.try_get_file(path);
        let stamp = match file_loader::file_stamp(path) {
            Ok(stamp) => stamp,
            Err(e) if e.is_not_found() => {
                if cached.is_some() {
                    self.remove_file(path);
                }
                return Ok(None);
            }
            Err(e) => {
                self.invalidate(e.to_string());
                return Err(e);
            }
        };
        if let Some(model) = cached
            && model.stamp == Some(stamp)
        {
            return Ok(Some(model));
        }

        let _guard = self.parse_lock.lock();
        // another caller may have parsed it while we waited
        if let Some(model) = self.try_get_file(path)
            && model.stamp == Some(stamp)
        {
            return Ok(Some(model));
        }
        match self.parse(path) {
            Ok(model) => Ok(Some(model)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                self.invalidate(e.to_string());
                Err(e)
            }
        }
    }

    /// Re-parse a cached file if its stamp changed. Untracked files are left alone.
    pub fn refresh_file(&self, path: &Path) -> Result<Option<Arc<FileModel>>, LoadError> {
        if !self.has_file(path) {
            return Ok(None);
        }
        self.load(path)
    }

    fn parse(&self, path: &Path) -> Result<Arc<FileModel>, LoadError> {
        let model = Arc::new(file_loader::parse_file(path)?);
        self.parse_count.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("[MODEL] parsed {}", path.display());
        self.add_file(Arc::clone(&model));
        Ok(model)
    }

    // ========================================================================
    // EXPLORATION
    // ========================================================================

    /// Exclude directories (by name) from exploration.
    pub fn manual_exploration(&self, hidden: &[&str]) {
        let mut state = self.state.write();
        for name in hidden {
            if !state.excluded.iter().any(|x| x == name) {
                state.excluded.push((*name).to_string());
            }
        }
    }

    pub fn excluded_dirs(&self) -> Vec<String> {
        self.state.read().excluded.clone()
    }

    /// Parse every source file of the root, in parallel.
    ///
    /// Files whose stamp is unchanged keep their cached model; files gone
    /// from disk are dropped. Returns the number of files parsed.
    pub fn explore(&self, extension: &str) -> usize {
        if !self.is_valid() {
            return 0;
        }
        let excluded = {
            let mut state = self.state.write();
            state.updating = true;
            state.excluded.clone()
        };

        let paths = match file_loader::collect_file_paths(&self.path, extension, &excluded) {
            Ok(paths) => paths,
            Err(e) => {
                self.state.write().updating = false;
                self.invalidate(e.to_string());
                return 0;
            }
        };

        let stamps: Vec<Option<FileStamp>> = {
            let state = self.state.read();
            paths
                .iter()
                .map(|p| state.files.get(p).and_then(|m| m.stamp))
                .collect()
        };

        let parsed: Vec<FileModel> = paths
            .par_iter()
            .zip(stamps.par_iter())
            .filter_map(|(path, cached)| {
                if cached.is_some() && file_loader::file_stamp(path).ok() == *cached {
                    return None;
                }
                match file_loader::parse_file(path) {
                    Ok(model) => Some(model),
                    Err(e) => {
                        tracing::warn!("[CLASSPATH] failed to parse {}: {}", path.display(), e);
                        None
                    }
                }
            })
            .collect();

        let count = parsed.len();
        self.parse_count.fetch_add(count, Ordering::Relaxed);

        let found: FxHashSet<&Path> = paths.iter().map(PathBuf::as_path).collect();
        let mut state = self.state.write();
        for model in parsed {
            state.files.insert(model.path.clone(), Arc::new(model));
        }
        state.files.retain(|path, _| found.contains(path.as_path()) || path.is_file());
        state.updating = false;
        state.explored = true;
        drop(state);

        tracing::debug!(
            "[CLASSPATH] explored {}: {} file(s), {} parsed",
            self.path.display(),
            self.file_count(),
            count
        );
        count
    }

    /// List a package directory of this root (used by lazy package resolution).
    pub fn list_package(&self, package: &str, extension: &str) -> DirectoryEntries {
        let mut dir = self.path.clone();
        if !package.is_empty() {
            dir.extend(package.split('.'));
        }
        let mut entries = DirectoryEntries::default();
        let read_dir = match std::fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                tracing::trace!("[CLASSPATH] cannot list {}: {}", dir.display(), e);
                return entries;
            }
        };
        let excluded = self.excluded_dirs();
        for entry in read_dir.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_dir() {
                if !name.starts_with('.') && !excluded.iter().any(|x| x == name) {
                    entries.packages.push(name.to_string());
                }
            } else if file_loader::has_extension(&path, extension)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                entries.modules.push(stem.to_string());
            }
        }
        entries.packages.sort();
        entries.modules.sort();
        entries
    }
}

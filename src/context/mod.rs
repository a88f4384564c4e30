//! Resolver state for one dialect.
//!
//! A [`Context`] owns the classpath, the current file and the symbol cache.
//! Mutations (classpath changes, switching files, file notifications) take
//! `&mut self` and dirty the cache; queries take `&self` and memoize through
//! interior locks, so a context can be shared behind an `Arc` between edits.
//!
//! ## Resolution order
//!
//! ```text
//! resolve_type(name, file)
//!     ↓ empty / void keyword        → void
//!     ↓ Base@Index                  → resolve_type_index
//!     ↓ classes of the same file
//!     ↓ explicit import             → qualifies the name
//!     ↓ wildcard imports            → get_model (lazy) / resolve_package (eager)
//!     ↓ same package, qualified     → get_model over the classpath roots
//! ```
//!
//! Every failure degrades to [`ClassModel::void()`].

mod cache;
mod diagnostics;
mod elements;
mod features;
mod imports;
mod packages;
mod resolve;
mod settings;
mod toplevel;

pub use cache::CompletionCache;
pub use diagnostics::{Diagnostic, Severity, codes};
pub use elements::ResolveResult;
pub use features::ContextFeatures;
pub use packages::PackageContents;
pub use settings::{ContextSettings, ContextSetup};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::model::{ClassModel, FileModel};
use crate::project::{ClassPath, PathModel, PathRegistry, SdkLayout, file_loader, parse_version};

/// A typed clone together with the class it was cloned from.
#[derive(Debug)]
struct IndexedType {
    source: Arc<ClassModel>,
    class: Arc<ClassModel>,
}

/// Resolver state for one dialect.
#[derive(Debug)]
pub struct Context {
    settings: ContextSettings,
    features: ContextFeatures,
    setup: Option<ContextSetup>,
    registry: PathRegistry,
    classpath: ClassPath,
    temporary_path: Option<PathBuf>,
    started: bool,
    platform: String,
    major_version: u32,
    minor_version: u32,
    top_level: FileModel,
    current_file: Option<Arc<FileModel>>,
    current_class: Arc<ClassModel>,
    current_line: u32,
    in_private_section: bool,
    completion_cache: Mutex<CompletionCache>,
    indexed_types: Mutex<FxHashMap<SmolStr, IndexedType>>,
}

impl Context {
    pub fn new(settings: ContextSettings, features: ContextFeatures) -> Self {
        let major_version = settings.default_player_version;
        Self {
            settings,
            features,
            setup: None,
            registry: PathRegistry::new(),
            classpath: ClassPath::new(),
            temporary_path: None,
            started: false,
            platform: String::new(),
            major_version,
            minor_version: 0,
            top_level: FileModel::default(),
            current_file: None,
            current_class: ClassModel::void(),
            current_line: 0,
            in_private_section: false,
            completion_cache: Mutex::new(CompletionCache::new()),
            indexed_types: Mutex::new(FxHashMap::default()),
        }
    }

    /// An ActionScript 2 context.
    pub fn as2(settings: ContextSettings) -> Self {
        Self::new(settings, ContextFeatures::as2())
    }

    /// An ActionScript 3 context.
    pub fn as3(settings: ContextSettings) -> Self {
        Self::new(settings, ContextFeatures::as3())
    }

    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    pub fn features(&self) -> &ContextFeatures {
        &self.features
    }

    pub fn classpath(&self) -> &ClassPath {
        &self.classpath
    }

    /// True once the classpath was built.
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn major_version(&self) -> u32 {
        self.major_version
    }

    pub fn minor_version(&self) -> u32 {
        self.minor_version
    }

    pub fn temporary_path(&self) -> Option<&Path> {
        self.temporary_path.as_deref()
    }

    pub fn current_file(&self) -> Option<&Arc<FileModel>> {
        self.current_file.as_ref()
    }

    /// The class at the current line (void outside any class).
    pub fn current_class(&self) -> Arc<ClassModel> {
        Arc::clone(&self.current_class)
    }

    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    pub fn in_private_section(&self) -> bool {
        self.in_private_section
    }

    /// Project setup used by the next [`build_class_path`](Self::build_class_path).
    pub fn set_setup(&mut self, setup: ContextSetup) {
        self.setup = Some(setup);
    }

    /// Drop the symbol cache of the current file.
    pub fn mark_dirty(&self) {
        self.completion_cache.lock().mark_dirty();
    }

    pub fn is_cache_dirty(&self) -> bool {
        self.completion_cache.lock().is_dirty()
    }

    fn is_lazy(&self) -> bool {
        self.settings.lazy_classpath_exploration
    }

    fn extension(&self) -> &str {
        &self.settings.default_extension
    }

    // ========================================================================
    // CLASSPATH MANAGEMENT
    // ========================================================================

    /// Forget all roots. Cached models stay in the registry for reuse until
    /// the next rebuild drops the roots it no longer registers.
    pub fn release_classpath(&mut self) {
        self.classpath.clear();
        self.indexed_types.lock().clear();
        self.mark_dirty();
    }

    /// Rebuild the classpath from settings and setup.
    ///
    /// Root order: project classpath, library directory, user classpath,
    /// then SDK roots. Roots are explored up front unless exploration is lazy.
    pub fn build_class_path(&mut self) {
        let temporary = self.classpath.remove_temporary();
        self.release_classpath();
        self.started = true;

        let setup = self.setup.clone().unwrap_or_else(|| {
            ContextSetup::new("Flash Player", format!("{}.0", self.settings.default_player_version))
        });
        self.platform = setup.platform.clone();
        let (major, minor) = parse_version(&setup.version, self.settings.default_player_version);
        self.minor_version = minor;

        let layout = SdkLayout::discover(
            self.settings.sdk_path.as_deref(),
            self.settings.use_intrinsic_sdk,
            self.settings.mm_classpath.as_deref(),
            major,
        );
        self.major_version = layout.major_version;

        let initial: Vec<Arc<PathModel>> = layout
            .roots
            .iter()
            .map(|root| {
                let model = self.registry.get_or_create(&root.path);
                model.manual_exploration(&root.hidden_dirs);
                model
            })
            .collect();

        for path in &setup.classpath {
            self.register_root(path);
        }
        if let Some(library) = self.settings.library_dir.clone() {
            self.register_root(&library.join(&self.settings.language_id).join("classes"));
        }
        for path in self.settings.user_classpath.clone() {
            self.register_root(&path);
        }
        for model in initial {
            self.classpath.add(model);
        }

        if !self.is_lazy() {
            let extension = self.settings.default_extension.clone();
            for root in self.classpath.iter().filter(|r| r.is_valid()) {
                root.explore(&extension);
            }
        }

        // top-level declarations never come from the temporary root
        self.init_top_level_elements();
        self.registry.retain_roots(&self.classpath);

        // the temporary root keeps its parsed models across rebuilds
        match temporary {
            Some(model) => {
                if !self.classpath.insert_temporary(model) {
                    self.temporary_path = None;
                }
            }
            None => {
                if let Some(path) = self.temporary_path.take() {
                    self.set_temporary_path(Some(path));
                }
            }
        }

        if self.current_file.is_some() {
            self.update_current_class();
        }
        self.mark_dirty();
        tracing::debug!(
            "[CLASSPATH] built {} root(s) for {} {}.{}",
            self.classpath.len(),
            self.platform,
            self.major_version,
            self.minor_version
        );
    }

    fn register_root(&mut self, path: &Path) -> bool {
        let model = self.registry.get_or_create(path);
        self.classpath.add(model)
    }

    /// Add a root to the classpath. Returns false if it was already registered.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> bool {
        if !self.started {
            self.build_class_path();
        }
        let model = self.registry.get_or_create(path.as_ref());
        let added = self.classpath.add(Arc::clone(&model));
        if added {
            if !self.is_lazy() && model.is_valid() {
                model.explore(self.extension());
            }
            self.mark_dirty();
        }
        added
    }

    /// Set (or clear) the root inferred for a file outside the classpath.
    pub fn set_temporary_path(&mut self, path: Option<PathBuf>) {
        let path = path.map(|p| crate::project::normalize_path(&p));
        if path == self.temporary_path && self.classpath.temporary().is_some() {
            return;
        }
        let previous = self.classpath.remove_temporary();
        self.temporary_path = path.clone();
        if let Some(path) = path
            && !self.classpath.contains(&path)
        {
            let model = previous
                .filter(|p| p.path() == path)
                .unwrap_or_else(|| Arc::new(PathModel::temporary(&path)));
            self.classpath.insert_temporary(model);
        }
        self.mark_dirty();
    }

    /// Re-check an invalid root. Returns its new validity.
    pub fn revalidate_path(&mut self, path: &Path) -> bool {
        let key = crate::project::normalize_path(path);
        let Some(root) = self.classpath.iter().find(|r| r.path() == key).cloned() else {
            return false;
        };
        let valid = root.revalidate();
        if valid && !self.is_lazy() && !root.is_temporary() {
            root.explore(self.extension());
        }
        self.mark_dirty();
        valid
    }

    // ========================================================================
    // CURRENT FILE
    // ========================================================================

    /// Make `path` the current file.
    ///
    /// Files outside every root get a temporary root: their directory minus
    /// the package directories.
    pub fn set_current_file(&mut self, path: impl AsRef<Path>) {
        if !self.started {
            self.build_class_path();
        }
        let path = path.as_ref();
        let in_classpath = self
            .classpath
            .find_root_for(path)
            .is_some_and(|r| !r.is_temporary());

        let model = self.load_file_model(path);
        if in_classpath || model.ignored {
            self.set_temporary_path(None);
        } else {
            let base = model
                .base_path()
                .or_else(|| path.parent().map(Path::to_path_buf));
            self.set_temporary_path(base);
            if let Some(temporary) = self.classpath.temporary()
                && temporary.contains_path(path)
                && !model.path.as_os_str().is_empty()
            {
                temporary.add_file(Arc::clone(&model));
            }
        }

        tracing::debug!("[MODEL] current file {}", path.display());
        self.current_file = Some(model);
        self.current_line = 0;
        self.update_current_class();
        self.mark_dirty();
    }

    /// Move the cursor: updates the current class and the private-section flag.
    pub fn set_current_line(&mut self, line: u32) {
        if self.current_line == line {
            return;
        }
        let was_private = self.in_private_section;
        let previous = Arc::clone(&self.current_class);
        self.current_line = line;
        self.update_current_class();
        if was_private != self.in_private_section || !Arc::ptr_eq(&previous, &self.current_class) {
            self.mark_dirty();
        }
    }

    /// Refresh the current model if the file changed on disk and report
    /// package/path and type/file-name mismatches.
    pub fn check_model(&mut self, on_open: bool) -> Vec<Diagnostic> {
        let Some(file) = self.current_file.clone() else {
            return Vec::new();
        };
        if file.ignored || !file.path.is_file() {
            return Vec::new();
        }

        let previous = on_open.then(|| (file.package.clone(), file.public_class().name.clone()));
        let stamp = file_loader::file_stamp(&file.path).ok();
        let file = if stamp.is_some() && stamp != file.stamp {
            let reloaded = self.load_file_model(&file.path);
            self.current_file = Some(Arc::clone(&reloaded));
            self.update_current_class();
            reloaded
        } else {
            file
        };
        self.mark_dirty();

        if !self.features.check_file_name || !self.settings.check_file_name || file.version <= 1 {
            return Vec::new();
        }
        self.check_file_name(&file, previous)
    }

    fn check_file_name(&self, file: &FileModel, previous: Option<(SmolStr, SmolStr)>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let package = &file.package;
        let public_class = file.public_class();
        let package_line = public_class.span.start.line;

        let Some(dir) = file.path.parent() else {
            return diagnostics;
        };
        let path_matches = if package.is_empty() {
            self.classpath.iter().any(|r| r.path() == dir)
                || self.classpath.find_root_for(&file.path).is_none()
        } else {
            dir.ends_with(package.split('.').collect::<PathBuf>())
        };
        if !path_matches {
            tracing::debug!("[MODEL] package '{}' does not match {}", package, file.path.display());
            diagnostics.push(
                Diagnostic::warning(
                    &file.path,
                    package_line,
                    format!("Package '{}' does not match the file path", package),
                )
                .with_code(codes::PACKAGE_MISMATCH),
            );
            return diagnostics;
        }

        if public_class.is_void() {
            return diagnostics;
        }
        let current = (package.clone(), public_class.name.clone());
        if previous.as_ref() == Some(&current) {
            return diagnostics;
        }
        let qualified = public_class.qualified_name();
        let mut expected: PathBuf = qualified.split('.').collect();
        if let Some(ext) = file.path.extension() {
            expected.set_extension(ext);
        }
        let actual = file.path.to_string_lossy().to_uppercase();
        let expected = expected.to_string_lossy().to_uppercase();
        if !actual.ends_with(&expected) {
            diagnostics.push(
                Diagnostic::warning(
                    &file.path,
                    public_class.span.start.line,
                    format!("Type '{}' does not match the file name", qualified),
                )
                .with_code(codes::TYPE_NAME_MISMATCH),
            );
        }
        diagnostics
    }

    /// A file was modified outside the editor: refresh the roots caching it.
    pub fn notify_file_changed(&mut self, path: &Path) {
        let mut refreshed = false;
        for root in self.classpath.iter() {
            let result = if root.has_file(path) {
                root.refresh_file(path)
            } else if root.contains_path(path)
                && root.was_explored()
                && file_loader::has_extension(path, &self.settings.default_extension)
            {
                root.load(path)
            } else {
                continue;
            };
            match result {
                Ok(_) => refreshed = true,
                Err(e) => tracing::warn!("[CLASSPATH] refresh of {} failed: {}", path.display(), e),
            }
        }
        if self.current_file.as_ref().is_some_and(|f| f.path == path) {
            let reloaded = self.load_file_model(path);
            self.current_file = Some(reloaded);
            self.update_current_class();
            refreshed = true;
        }
        if refreshed {
            tracing::trace!("[MODEL] refreshed {}", path.display());
        }
        self.mark_dirty();
    }

    /// A file was deleted: drop it from every root cache.
    pub fn notify_file_removed(&mut self, path: &Path) {
        for root in self.classpath.iter() {
            if root.remove_file(path).is_some() {
                tracing::trace!("[MODEL] dropped {} from {}", path.display(), root.path().display());
            }
        }
        self.mark_dirty();
    }

    /// Model for `path`: through the root caching it when there is one,
    /// parsed directly otherwise. Never fails.
    fn load_file_model(&self, path: &Path) -> Arc<FileModel> {
        if !file_loader::has_extension(path, self.extension()) {
            return Arc::new(FileModel {
                path: path.to_path_buf(),
                ..FileModel::ignore()
            });
        }
        if let Some(root) = self.classpath.find_root_for(path)
            && let Ok(Some(model)) = root.load(path)
        {
            return model;
        }
        match file_loader::parse_file(path) {
            Ok(model) => Arc::new(model),
            Err(e) => {
                tracing::debug!("[MODEL] {} not loaded: {}", path.display(), e);
                Arc::new(FileModel::new(path))
            }
        }
    }

    fn update_current_class(&mut self) {
        let (class, in_private) = match &self.current_file {
            Some(file) if !file.ignored => {
                let in_private = file.in_private_section(self.current_line);
                let mut class = file.class_at_line(self.current_line);
                if class.is_void() && !in_private {
                    class = file.public_class();
                }
                (class, in_private)
            }
            _ => (ClassModel::void(), false),
        };
        self.current_class = class;
        self.in_private_section = in_private;
        self.update_top_level_elements();
    }

    fn is_file_valid(&self) -> bool {
        self.current_file.as_ref().is_some_and(|f| !f.ignored)
    }

    fn is_current_file(&self, file: &FileModel) -> bool {
        self.current_file
            .as_ref()
            .is_some_and(|current| !file.path.as_os_str().is_empty() && current.path == file.path)
    }

    /// The cached model declaring `class`.
    pub(crate) fn file_model_of(&self, class: &ClassModel) -> Option<Arc<FileModel>> {
        if class.file.as_os_str().is_empty() {
            return None;
        }
        if let Some(current) = &self.current_file
            && current.path == class.file
        {
            return Some(Arc::clone(current));
        }
        self.classpath.iter().find_map(|root| root.try_get_file(&class.file))
    }
}

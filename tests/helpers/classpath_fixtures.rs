//! Temporary classpath directories for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use ascontext::context::{Context, ContextSettings};
use tempfile::TempDir;

/// A temporary directory holding one or more classpath roots.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Absolute path of `relative` inside the fixture.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a source file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
        fs::write(&path, content).expect("write file");
        path
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).expect("create dir");
        path
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.path(relative)).expect("remove file");
    }

    fn settings(&self, roots: &[&str], lazy: bool) -> ContextSettings {
        ContextSettings::default()
            .with_lazy_exploration(lazy)
            .with_user_classpath(roots.iter().map(|r| self.path(r)))
    }

    /// An ActionScript 2 context over the given roots, classpath built.
    pub fn as2(&self, roots: &[&str], lazy: bool) -> Context {
        let mut context = Context::as2(self.settings(roots, lazy));
        context.build_class_path();
        context
    }

    /// An ActionScript 3 context over the given roots, classpath built.
    pub fn as3(&self, roots: &[&str], lazy: bool) -> Context {
        let mut context = Context::as3(ContextSettings {
            language_id: "AS3".to_string(),
            ..self.settings(roots, lazy)
        });
        context.build_class_path();
        context
    }
}

/// Parse count of the root registered for `path`.
pub fn parse_count(context: &Context, path: &Path) -> usize {
    context
        .classpath()
        .iter()
        .find(|r| r.path() == path)
        .map(|r| r.parse_count())
        .expect("root is registered")
}

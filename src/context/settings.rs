//! Context configuration.
//!
//! Settings are plain data with builder-style setters. With the `serde`
//! feature they can be read from JSON (camelCase keys, all optional).

use std::path::PathBuf;

use crate::base::constants::DEFAULT_EXTENSION;

/// User-level settings of a context.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ContextSettings {
    pub language_id: String,
    /// Source extension, with the dot.
    pub default_extension: String,
    /// Resolve by file-name guessing instead of exploring roots up front.
    pub lazy_classpath_exploration: bool,
    pub user_classpath: Vec<PathBuf>,
    /// Report package/path and type/file-name mismatches.
    pub check_file_name: bool,
    /// Compiler SDK directory (or executable).
    pub sdk_path: Option<PathBuf>,
    pub use_intrinsic_sdk: bool,
    /// Authoring tool classpath holding `FP<n>` directories.
    pub mm_classpath: Option<PathBuf>,
    pub default_player_version: u32,
    /// Shared library directory; `<language>/classes` is added to the classpath.
    pub library_dir: Option<PathBuf>,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            language_id: "AS2".to_string(),
            default_extension: DEFAULT_EXTENSION.to_string(),
            lazy_classpath_exploration: false,
            user_classpath: Vec::new(),
            check_file_name: true,
            sdk_path: None,
            use_intrinsic_sdk: true,
            mm_classpath: None,
            default_player_version: 8,
            library_dir: None,
        }
    }
}

impl ContextSettings {
    pub fn new(language_id: impl Into<String>) -> Self {
        Self {
            language_id: language_id.into(),
            ..Self::default()
        }
    }

    pub fn with_lazy_exploration(mut self, lazy: bool) -> Self {
        self.lazy_classpath_exploration = lazy;
        self
    }

    pub fn with_user_classpath(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.user_classpath = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sdk(mut self, path: impl Into<PathBuf>) -> Self {
        self.sdk_path = Some(path.into());
        self
    }

    pub fn with_mm_classpath(mut self, path: impl Into<PathBuf>) -> Self {
        self.mm_classpath = Some(path.into());
        self
    }

    pub fn with_library_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(path.into());
        self
    }

    pub fn with_player_version(mut self, version: u32) -> Self {
        self.default_player_version = version;
        self
    }

    pub fn with_check_file_name(mut self, check: bool) -> Self {
        self.check_file_name = check;
        self
    }

    /// Read settings from JSON. Missing keys keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Project-provided setup, overriding the settings' defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ContextSetup {
    pub platform: String,
    /// `"<major>[.<minor>]"` player version.
    pub version: String,
    pub classpath: Vec<PathBuf>,
}

impl Default for ContextSetup {
    fn default() -> Self {
        Self {
            platform: "Flash Player".to_string(),
            version: String::new(),
            classpath: Vec::new(),
        }
    }
}

impl ContextSetup {
    pub fn new(platform: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            version: version.into(),
            classpath: Vec::new(),
        }
    }

    pub fn with_classpath(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.classpath = paths.into_iter().map(Into::into).collect();
        self
    }
}

//! SDK-provided classpath roots.

use std::path::{Path, PathBuf};

use crate::base::constants::{MIN_MM_VERSION, MM_HIDDEN_DIRS, SDK_STD8_DIR, SDK_STD9_DIR, SDK_STD_DIR};

/// A root contributed by an SDK, with directories to keep out of exploration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SdkRoot {
    pub path: PathBuf,
    pub hidden_dirs: Vec<&'static str>,
}

impl SdkRoot {
    fn plain(path: PathBuf) -> Self {
        Self {
            path,
            hidden_dirs: Vec::new(),
        }
    }
}

/// Roots derived from the compiler SDK and the authoring tool classpath.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SdkLayout {
    pub roots: Vec<SdkRoot>,
    /// Player version after fallback (a missing `std9` downgrades to 8).
    pub major_version: u32,
}

impl SdkLayout {
    /// Discover SDK roots.
    ///
    /// `sdk` may point at the compiler executable; its directory is used then.
    /// Intrinsic roots come from `sdk` when `use_intrinsic` is set or no MM
    /// classpath is configured. MM roots are only used when no intrinsic root
    /// was found.
    pub fn discover(
        sdk: Option<&Path>,
        use_intrinsic: bool,
        mm_classpath: Option<&Path>,
        major_version: u32,
    ) -> Self {
        let mut layout = SdkLayout {
            roots: Vec::new(),
            major_version,
        };

        let sdk_dir = sdk.map(|p| {
            if p.extension().is_some() {
                p.parent().map(Path::to_path_buf).unwrap_or_default()
            } else {
                p.to_path_buf()
            }
        });
        if let Some(sdk_dir) = sdk_dir.filter(|d| d.is_dir())
            && (use_intrinsic || mm_classpath.is_none())
        {
            layout.add_intrinsic_roots(&sdk_dir);
        }

        if let Some(mm) = mm_classpath.filter(|d| d.is_dir())
            && layout.roots.is_empty()
        {
            layout.add_mm_roots(mm);
        }
        layout
    }

    fn add_intrinsic_roots(&mut self, sdk_dir: &Path) {
        if self.major_version == 9 {
            let std9 = sdk_dir.join(SDK_STD9_DIR);
            if std9.is_dir() {
                self.roots.push(SdkRoot::plain(std9));
            } else {
                self.major_version = 8;
            }
        }
        if self.major_version == 8 {
            let std8 = sdk_dir.join(SDK_STD8_DIR);
            if std8.is_dir() {
                self.roots.push(SdkRoot::plain(std8));
            }
        }
        let std = sdk_dir.join(SDK_STD_DIR);
        if std.is_dir() {
            self.roots.push(SdkRoot::plain(std));
        }
    }

    fn add_mm_roots(&mut self, mm: &Path) {
        let mut version = self.major_version;
        // FP9 classes override some FP8 classes
        if version > 8 {
            let newer = mm.join(format!("FP{version}"));
            if newer.is_dir() {
                self.roots.push(SdkRoot::plain(newer));
            }
            version = 8;
        }
        let base = mm.join(format!("FP{}", version.max(MIN_MM_VERSION)));
        if base.is_dir() {
            self.roots.push(SdkRoot {
                path: base,
                hidden_dirs: MM_HIDDEN_DIRS.to_vec(),
            });
        }
    }
}

/// Parse `"<major>[.<minor>]"`, keeping the defaults for missing parts.
pub fn parse_version(version: &str, default_major: u32) -> (u32, u32) {
    let mut parts = version.trim().split('.');
    let major = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(default_major);
    let minor = parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0);
    (major, minor)
}

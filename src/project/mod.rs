//! Classpath roots, source loading and exploration.

mod classpath;
mod error;
pub mod file_loader;
mod path_model;
mod sdk;

pub use classpath::{ClassPath, PathRegistry, normalize_path};
pub use error::LoadError;
pub use path_model::{DirectoryEntries, PathModel};
pub use sdk::{SdkLayout, SdkRoot, parse_version};

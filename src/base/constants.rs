//! Domain constants shared by the parser, the classpath explorer and the resolver.

/// Default source file extension (including the dot).
pub const DEFAULT_EXTENSION: &str = ".as";

/// Name of the optional file declaring top-level intrinsics on a classpath root.
pub const TOPLEVEL_FILE: &str = "toplevel.as";

/// Package and member separator.
pub const DOT: char = '.';

/// Short name of a wildcard import (`import a.b.*`).
pub const WILDCARD: &str = "*";

/// Separator between a base type and its index type (`Array@String`).
pub const INDEX_SEPARATOR: char = '@';

/// Directories of an MM classpath that must never be explored as packages.
pub const MM_HIDDEN_DIRS: &[&str] = &["aso", "FP7", "FP8", "FP9"];

/// Intrinsic classpath directories of an MTASC-style SDK.
pub const SDK_STD_DIR: &str = "std";
pub const SDK_STD8_DIR: &str = "std8";
pub const SDK_STD9_DIR: &str = "std9";

/// Lowest player version with its own MM classpath directory.
pub const MIN_MM_VERSION: u32 = 7;

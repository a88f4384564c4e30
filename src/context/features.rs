//! Dialect description: keyword names and language capabilities.

use smol_str::SmolStr;

/// What a dialect supports and how its core types are spelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextFeatures {
    pub void_key: SmolStr,
    pub object_key: SmolStr,
    pub boolean_key: SmolStr,
    pub number_key: SmolStr,
    /// Integer type, when the dialect has one.
    pub integer_key: Option<SmolStr>,
    pub string_key: SmolStr,
    pub array_key: SmolStr,
    /// The untyped type (`*`).
    pub dynamic_key: SmolStr,
    /// Type of `_root` and of `this` in script files.
    pub doc_type: SmolStr,

    /// Types can be resolved against their own package.
    pub has_packages: bool,
    /// `import a.b.*` is allowed.
    pub has_imports_wildcard: bool,
    /// Parent packages are visible without import.
    pub has_friendly_parent_packages: bool,
    /// Files are modules (`pkg.Module.Type`).
    pub has_modules: bool,
    /// Several public types per file.
    pub has_multiple_defs: bool,
    /// `_levelN` globals exist.
    pub has_levels: bool,
    pub check_file_name: bool,

    pub code_keywords: Vec<&'static str>,
}

const AS2_CODE_KEYWORDS: &[&str] = &[
    "var", "function", "new", "delete", "instanceof", "return", "break", "continue", "if", "else",
    "for", "in", "while", "do", "switch", "case", "default", "with", "null", "undefined", "true",
    "false", "try", "catch", "finally", "throw",
];

const AS3_EXTRA_KEYWORDS: &[&str] = &["const", "is", "as", "typeof", "void", "super", "this"];

impl ContextFeatures {
    /// ActionScript 2: class files, no same-package visibility, `_levelN` globals.
    pub fn as2() -> Self {
        Self {
            void_key: SmolStr::new_static("Void"),
            object_key: SmolStr::new_static("Object"),
            boolean_key: SmolStr::new_static("Boolean"),
            number_key: SmolStr::new_static("Number"),
            integer_key: None,
            string_key: SmolStr::new_static("String"),
            array_key: SmolStr::new_static("Array"),
            dynamic_key: SmolStr::new_static("*"),
            doc_type: SmolStr::new_static("MovieClip"),
            has_packages: false,
            has_imports_wildcard: true,
            has_friendly_parent_packages: false,
            has_modules: false,
            has_multiple_defs: false,
            has_levels: true,
            check_file_name: true,
            code_keywords: AS2_CODE_KEYWORDS.to_vec(),
        }
    }

    /// ActionScript 3: package blocks, private sections, `int`.
    pub fn as3() -> Self {
        let mut code_keywords = AS2_CODE_KEYWORDS.to_vec();
        code_keywords.extend_from_slice(AS3_EXTRA_KEYWORDS);
        Self {
            void_key: SmolStr::new_static("void"),
            integer_key: Some(SmolStr::new_static("int")),
            doc_type: SmolStr::new_static("flash.display.MovieClip"),
            has_packages: true,
            has_levels: false,
            code_keywords,
            ..Self::as2()
        }
    }
}

impl Default for ContextFeatures {
    fn default() -> Self {
        Self::as2()
    }
}

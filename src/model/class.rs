//! Class and interface declarations.

use smol_str::SmolStr;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use super::flags::{FlagType, Visibility};
use super::member::{MemberList, MemberModel};
use crate::base::Span;

/// Shared "unresolved" sentinel returned by every failed lookup.
static VOID_CLASS: LazyLock<Arc<ClassModel>> = LazyLock::new(|| Arc::new(ClassModel::default()));

/// A class or interface declared in a source file.
///
/// A class with an empty name is the void sentinel: callers test
/// [`ClassModel::is_void`] instead of handling lookup errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassModel {
    /// Short name; for typed clones, the full `Base@Index` name.
    pub name: SmolStr,
    /// Package of the declaring file (empty for the root package).
    pub package: SmolStr,
    /// Declaring file (empty for virtual classes).
    pub file: PathBuf,
    pub flags: FlagType,
    pub access: Visibility,
    /// Superclass reference as written in the source (may be short or qualified).
    pub extends_type: SmolStr,
    pub implements: Vec<SmolStr>,
    pub members: MemberList,
    /// Index type of a typed clone (`Array@String` has index type `String`).
    pub index_type: Option<SmolStr>,
    pub comments: Option<String>,
    pub span: Span,
}

impl ClassModel {
    pub fn new(name: impl Into<SmolStr>, package: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            flags: FlagType::CLASS,
            access: Visibility::PUBLIC,
            ..Self::default()
        }
    }

    /// The shared void sentinel.
    pub fn void() -> Arc<ClassModel> {
        Arc::clone(&VOID_CLASS)
    }

    pub fn is_void(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_interface(&self) -> bool {
        self.flags.contains(FlagType::INTERFACE)
    }

    /// `package.Name`, or just `Name` in the root package.
    pub fn qualified_name(&self) -> SmolStr {
        if self.index_type.is_some() || self.package.is_empty() {
            self.name.clone()
        } else {
            SmolStr::from(format!("{}.{}", self.package, self.name))
        }
    }

    /// Entry describing this type in member lists (imports, package contents).
    pub fn to_member_model(&self) -> MemberModel {
        MemberModel {
            name: self.name.clone(),
            type_name: self.qualified_name(),
            flags: self.flags,
            access: self.access,
            span: self.span,
            parameters: Vec::new(),
            comments: self.comments.clone(),
        }
    }
}

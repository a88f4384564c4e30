//! Members (variables, functions, imports, package entries) and member lists.

use smol_str::SmolStr;
use std::cmp::Ordering;

use super::flags::{FlagType, Visibility};
use crate::base::Span;

/// A named declaration: class member, package-level declaration, import or
/// package/type entry produced by classpath exploration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberModel {
    /// Short name (`*` for wildcard imports).
    pub name: SmolStr,
    /// Declared type, or the fully qualified path for imports and type entries.
    pub type_name: SmolStr,
    pub flags: FlagType,
    pub access: Visibility,
    /// Line range of the declaration.
    pub span: Span,
    /// Function parameters, in declaration order.
    pub parameters: Vec<MemberModel>,
    pub comments: Option<String>,
}

impl MemberModel {
    pub fn new(
        name: impl Into<SmolStr>,
        type_name: impl Into<SmolStr>,
        flags: FlagType,
        access: Visibility,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            flags,
            access,
            ..Self::default()
        }
    }

    /// Set the declaration line range.
    pub fn with_lines(mut self, from: u32, to: u32) -> Self {
        self.span = Span::lines(from, to);
        self
    }

    /// First line of the declaration.
    pub fn line_from(&self) -> u32 {
        self.span.start.line
    }

    /// Returns true if this member matches the given flag and access masks.
    ///
    /// An empty mask matches anything.
    pub fn matches(&self, flags_mask: FlagType, access_mask: Visibility) -> bool {
        (flags_mask.is_empty() || self.flags.contains(flags_mask))
            && (access_mask.is_empty() || self.access.intersects(access_mask))
    }

    /// Returns true if this member is a wildcard import.
    pub fn is_wildcard(&self) -> bool {
        self.name == crate::base::constants::WILDCARD
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Ordered list of members with name-based lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberList {
    items: Vec<MemberModel>,
}

impl MemberList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberModel> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, MemberModel> {
        self.items.iter_mut()
    }

    /// Append a member (duplicates allowed).
    pub fn add(&mut self, member: MemberModel) {
        self.items.push(member);
    }

    /// Append all members of another list (duplicates allowed).
    pub fn add_all(&mut self, other: &MemberList) {
        self.items.extend(other.items.iter().cloned());
    }

    /// Append the members of another list whose names are not present yet.
    pub fn merge(&mut self, other: &MemberList) {
        for member in &other.items {
            if !self.contains(&member.name, FlagType::empty(), Visibility::empty()) {
                self.items.push(member.clone());
            }
        }
    }

    /// First member with this name matching the masks.
    pub fn search(
        &self,
        name: &str,
        flags_mask: FlagType,
        access_mask: Visibility,
    ) -> Option<&MemberModel> {
        self.items
            .iter()
            .find(|m| m.name == name && m.matches(flags_mask, access_mask))
    }

    /// Mutable variant of [`MemberList::search`].
    pub fn search_mut(
        &mut self,
        name: &str,
        flags_mask: FlagType,
        access_mask: Visibility,
    ) -> Option<&mut MemberModel> {
        self.items
            .iter_mut()
            .find(|m| m.name == name && m.matches(flags_mask, access_mask))
    }

    pub fn contains(&self, name: &str, flags_mask: FlagType, access_mask: Visibility) -> bool {
        self.search(name, flags_mask, access_mask).is_some()
    }

    /// Remove the first member equal to `member`.
    pub fn remove(&mut self, member: &MemberModel) -> bool {
        match self.items.iter().position(|m| m == member) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Sort by name, case-insensitively (stable).
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| compare_names(&a.name, &b.name));
    }

    /// Names in list order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|m| m.name.as_str()).collect()
    }
}

impl FromIterator<MemberModel> for MemberList {
    fn from_iter<I: IntoIterator<Item = MemberModel>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MemberList {
    type Item = MemberModel;
    type IntoIter = std::vec::IntoIter<MemberModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a MemberList {
    type Item = &'a MemberModel;
    type IntoIter = std::slice::Iter<'a, MemberModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

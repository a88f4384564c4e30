//! Per-current-file memoization of visible names.

use crate::model::MemberList;

/// Symbol cache of the current file.
///
/// Every entry is dropped together by [`mark_dirty`](Self::mark_dirty),
/// which the context calls whenever the current file, its content or the
/// classpath changes.
#[derive(Clone, Debug)]
pub struct CompletionCache {
    dirty: bool,
    imports: Option<MemberList>,
    elements: Option<MemberList>,
    all_types: Option<MemberList>,
}

impl Default for CompletionCache {
    fn default() -> Self {
        Self {
            dirty: true,
            imports: None,
            elements: None,
            all_types: None,
        }
    }
}

impl CompletionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        *self = Self::default();
    }

    pub fn imports(&self) -> Option<&MemberList> {
        self.imports.as_ref()
    }

    pub fn set_imports(&mut self, imports: MemberList) {
        self.imports = Some(imports);
    }

    /// Visible elements, only while the cache is clean.
    pub fn elements(&self) -> Option<&MemberList> {
        if self.dirty { None } else { self.elements.as_ref() }
    }

    pub fn set_elements(&mut self, elements: MemberList) {
        self.elements = Some(elements);
        self.dirty = false;
    }

    pub fn all_types(&self) -> Option<&MemberList> {
        self.all_types.as_ref()
    }

    pub fn set_all_types(&mut self, types: MemberList) {
        self.all_types = Some(types);
    }
}

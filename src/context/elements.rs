//! Visible names: top-level intrinsics, the symbol cache of the current file
//! and inheritance queries.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::path::PathBuf;
use std::sync::Arc;

use super::Context;
use super::resolve::qualify;
use crate::model::{ClassModel, FlagType, MemberList, MemberModel, Visibility};

/// Outcome of an element lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolveResult {
    /// The matching declaration.
    pub member: Option<MemberModel>,
    /// Type of the element (void when unknown).
    pub type_class: Arc<ClassModel>,
    /// File declaring the element.
    pub file: Option<PathBuf>,
    /// Class the lookup was made from.
    pub related_class: Option<Arc<ClassModel>>,
}

impl Default for ResolveResult {
    fn default() -> Self {
        Self {
            member: None,
            type_class: ClassModel::void(),
            file: None,
            related_class: None,
        }
    }
}

impl ResolveResult {
    /// Returns true if nothing matched.
    pub fn is_null(&self) -> bool {
        self.member.is_none() && self.type_class.is_void()
    }
}

/// `_level0`, `_level12`...
fn is_level_token(token: &str) -> bool {
    token
        .strip_prefix("_level")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

impl Context {
    /// Resolve `this`, `super`, a top-level declaration or a `_levelN` global.
    pub fn resolve_top_level_element(&self, token: &str) -> ResolveResult {
        let members = &self.top_level.members;
        if members.is_empty() {
            return ResolveResult::default();
        }
        let search = |name: &str| members.search(name, FlagType::empty(), Visibility::empty()).cloned();
        let current = Arc::clone(&self.current_class);

        let this_class = || {
            if current.is_void() {
                let this_type = search("this").map(|m| m.type_name).unwrap_or_default();
                self.resolve_type(&this_type, None)
            } else {
                Arc::clone(&current)
            }
        };

        if token == "this" {
            return ResolveResult {
                member: search("this"),
                type_class: this_class(),
                file: self.current_file.as_ref().map(|f| f.path.clone()),
                related_class: Some(Arc::clone(&current)),
            };
        }
        if token == "super" {
            let extends = self.resolve_extends(&this_class());
            if !extends.is_void() {
                return ResolveResult {
                    member: search("super"),
                    file: Some(extends.file.clone()).filter(|p| !p.as_os_str().is_empty()),
                    type_class: extends,
                    related_class: Some(current),
                };
            }
        }

        if let Some(member) = search(token) {
            let type_name = if member.flags.intersects(FlagType::TYPE) && member.type_name.is_empty() {
                member.name.clone()
            } else {
                member.type_name.clone()
            };
            return ResolveResult {
                type_class: self.resolve_type(&type_name, None),
                member: Some(member),
                file: Some(self.top_level.path.clone()),
                related_class: None,
            };
        }

        if self.features.has_levels && is_level_token(token) {
            let doc_type = self.features.doc_type.clone();
            return ResolveResult {
                member: Some(MemberModel::new(token, doc_type.clone(), FlagType::VARIABLE, Visibility::PUBLIC)),
                type_class: self.resolve_type(&doc_type, None),
                file: Some(self.top_level.path.clone()),
                related_class: None,
            };
        }
        ResolveResult::default()
    }

    /// Types, packages and package-level declarations visible from the
    /// current file. Served from the symbol cache while it is clean.
    pub fn visible_external_elements(&self) -> MemberList {
        let Some(file) = self.current_file.clone().filter(|_| self.is_file_valid()) else {
            return MemberList::new();
        };
        if let Some(cached) = self.completion_cache.lock().elements() {
            return cached.clone();
        }

        let mut elements = MemberList::new();
        if let Some(root) = self.resolve_package("", false) {
            elements.add_all(&root.imports);
            elements.add_all(&root.members);
        }
        elements.add(self.void_member());

        if self.features.has_packages
            && !file.package.is_empty()
            && let Some(same_package) = self.resolve_package(&file.package, false)
        {
            for member in same_package.imports.iter() {
                if !member.flags.contains(FlagType::PACKAGE) {
                    elements.add(member.clone());
                }
            }
            for member in same_package.members.iter() {
                let mut member = member.clone();
                member.type_name = qualify(&file.package, &member.name);
                elements.add(member);
            }
        }

        if file.private_section_index > 0 {
            if self.in_private_section && file.classes.len() > 1 {
                let main = file.public_class();
                if !main.is_void() {
                    let qualified = main.qualified_name();
                    let stale = elements
                        .search(&main.name, FlagType::empty(), Visibility::empty())
                        .filter(|m| m.type_name == qualified)
                        .cloned();
                    if let Some(stale) = stale {
                        elements.remove(&stale);
                    }
                }
            }
            for class in &file.classes {
                if self.features.has_multiple_defs || class.access.contains(Visibility::PRIVATE) {
                    elements.add(class.to_member_model());
                }
            }
        }

        elements.add_all(&self.resolve_imports(&file));
        elements.sort();
        tracing::trace!("[RESOLVE] {} visible element(s) for {}", elements.len(), file.path.display());
        self.completion_cache.lock().set_elements(elements.clone());
        elements
    }

    /// Every public type of the searchable roots, by qualified name.
    pub fn all_project_classes(&self) -> MemberList {
        if let Some(cached) = self.completion_cache.lock().all_types() {
            return cached.clone();
        }
        let mut types = MemberList::new();
        for root in self.classpath.searchable() {
            for file in root.files() {
                let class = file.public_class();
                if !class.is_void() && class.index_type.is_none() && class.access == Visibility::PUBLIC {
                    let mut item = class.to_member_model();
                    item.name = item.type_name.clone();
                    types.add(item);
                }
            }
        }
        types.add(self.void_member());
        types.sort();
        self.completion_cache.lock().set_all_types(types.clone());
        types
    }

    fn void_member(&self) -> MemberModel {
        let void_key = &self.features.void_key;
        MemberModel::new(
            void_key.clone(),
            void_key.clone(),
            FlagType::CLASS | FlagType::INTRINSIC,
            Visibility::empty(),
        )
    }

    /// Superclass of `class`, void for root types, interfaces without
    /// `extends` and unresolved or self-referencing names.
    pub fn resolve_extends(&self, class: &ClassModel) -> Arc<ClassModel> {
        if class.is_void() {
            return ClassModel::void();
        }
        let extends = if !class.extends_type.is_empty() {
            class.extends_type.clone()
        } else if class.is_interface() {
            return ClassModel::void();
        } else {
            self.default_inheritance(&class.package, &class.name)
        };
        let file = self.file_model_of(class);
        let resolved = self.resolve_type(&extends, file.as_deref());
        if !resolved.is_void() && resolved.qualified_name() == class.qualified_name() {
            tracing::debug!("[RESOLVE] '{}' extends itself", class.qualified_name());
            return ClassModel::void();
        }
        resolved
    }

    /// Ancestors of `class`, nearest first. Stops at the first cycle.
    pub fn inheritance_chain(&self, class: &ClassModel) -> Vec<Arc<ClassModel>> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(class.qualified_name());
        let mut parent = self.resolve_extends(class);
        while !parent.is_void() && seen.insert(parent.qualified_name()) {
            let next = self.resolve_extends(&parent);
            chain.push(parent);
            parent = next;
        }
        chain
    }

    /// Visibility of `with_class` members from code in `in_class`: private
    /// members are visible along the inheritance chain.
    pub fn types_affinity(&self, in_class: &ClassModel, with_class: &ClassModel) -> Visibility {
        if in_class.is_void() || with_class.is_void() {
            return Visibility::PUBLIC;
        }
        let target = with_class.qualified_name();
        let related = in_class.qualified_name() == target
            || self
                .inheritance_chain(in_class)
                .iter()
                .any(|c| c.qualified_name() == target);
        if related {
            Visibility::PUBLIC | Visibility::PRIVATE
        } else {
            Visibility::PUBLIC
        }
    }

    /// Implicit superclass of a type declared without `extends`.
    pub fn default_inheritance(&self, package: &str, name: &str) -> SmolStr {
        if package.is_empty() && self.features.object_key == name {
            self.features.void_key.clone()
        } else {
            self.features.object_key.clone()
        }
    }
}

//! Import expansion.
//!
//! Expanded imports live in the symbol cache only; the file's own import
//! list is never modified.

use super::Context;
use super::resolve::split_qualified;
use crate::base::constants::WILDCARD;
use crate::model::{FileModel, FlagType, MemberList, MemberModel, Visibility};

impl Context {
    /// Everything `in_file` imports, wildcards expanded.
    ///
    /// For the current file the result is cached, and when the file declares
    /// several classes only the imports of the section holding the cursor
    /// (package block or private section) are used.
    pub fn resolve_imports(&self, in_file: &FileModel) -> MemberList {
        let is_current = self.is_current_file(in_file);
        if is_current && let Some(cached) = self.completion_cache.lock().imports() {
            return cached.clone();
        }

        let filter = is_current && in_file.classes.len() > 1 && in_file.private_section_index > 0;
        let (line_min, line_max) = if !filter {
            (0, u32::MAX)
        } else if self.in_private_section {
            (in_file.private_section_index, u32::MAX)
        } else {
            (0, in_file.private_section_index - 1)
        };

        let mut imports = MemberList::new();
        for item in in_file.imports.iter() {
            let line = item.line_from();
            if line < line_min || line > line_max {
                continue;
            }
            if item.is_wildcard() {
                let package = item
                    .type_name
                    .strip_suffix(WILDCARD)
                    .map(|p| p.trim_end_matches('.'))
                    .unwrap_or(item.type_name.as_str());
                if let Some(contents) = self.resolve_package(package, false) {
                    imports.add_all(&contents.imports);
                    imports.add_all(&contents.members);
                }
            } else if self.is_lazy() {
                imports.add(item.clone());
            } else if let Some(member) = self.resolve_import(item) {
                imports.add(member);
            }
        }

        tracing::trace!(
            "[RESOLVE] {} import(s) expanded to {} entries",
            in_file.imports.len(),
            imports.len()
        );
        if is_current {
            self.completion_cache.lock().set_imports(imports.clone());
        }
        imports
    }

    /// A type, or failing that a package-level declaration.
    fn resolve_import(&self, item: &MemberModel) -> Option<MemberModel> {
        let class = self.resolve_type(&item.type_name, None);
        if !class.is_void() {
            return Some(class.to_member_model());
        }
        let (package, token) = split_qualified(&item.type_name);
        if package.is_empty() {
            return None;
        }
        let contents = self.resolve_package(package, false)?;
        contents
            .members
            .search(token, FlagType::empty(), Visibility::empty())
            .cloned()
    }

    /// Returns true if `member` (a type entry) is imported by the current
    /// file at or before `at_line`, explicitly or through a wildcard.
    pub fn is_imported(&self, member: &MemberModel, at_line: u32) -> bool {
        if member.name.is_empty() {
            return false;
        }
        let Some(file) = &self.current_file else {
            return false;
        };
        let line_min = if self.in_private_section {
            file.private_section_index
        } else {
            0
        };
        file.imports.iter().any(|import| {
            let line = import.line_from();
            (line >= line_min && line <= at_line && import.name == member.name && import.type_name == member.type_name)
                || (import.is_wildcard() && member.type_name.as_str() == import.type_name.replace(WILDCARD, &member.name))
        })
    }
}

//! Symbol listing for workspace and document views.

use std::path::PathBuf;
use std::sync::Arc;

use crate::context::Context;
use crate::model::{FileModel, FlagType, MemberModel};

use super::completion::CompletionKind;

/// A symbol for the workspace symbol list or document outline.
#[derive(Clone, Debug)]
pub struct SymbolInfo {
    /// Symbol name.
    pub name: Arc<str>,
    /// Qualified name (for grouping/hierarchy).
    pub qualified_name: Arc<str>,
    pub kind: CompletionKind,
    /// File containing the symbol (empty when unknown).
    pub file: PathBuf,
    /// Start line (0-indexed).
    pub start_line: u32,
    /// End line (0-indexed).
    pub end_line: u32,
}

impl SymbolInfo {
    fn from_member(member: &MemberModel, container: &str, file: &FileModel) -> Self {
        let qualified = if container.is_empty() {
            member.name.to_string()
        } else {
            format!("{container}.{}", member.name)
        };
        Self {
            name: Arc::from(member.name.as_str()),
            qualified_name: Arc::from(qualified),
            kind: kind_of(member.flags),
            file: file.path.clone(),
            start_line: member.span.start.line,
            end_line: member.span.end.line,
        }
    }

    /// Get the container name (parent path) for hierarchy building.
    pub fn container_name(&self) -> Option<&str> {
        let qname = self.qualified_name.as_ref();
        qname.rfind('.').map(|idx| &qname[..idx])
    }
}

fn kind_of(flags: FlagType) -> CompletionKind {
    if flags.contains(FlagType::INTERFACE) {
        CompletionKind::Interface
    } else if flags.contains(FlagType::CLASS) {
        CompletionKind::Class
    } else if flags.intersects(FlagType::FUNCTION | FlagType::GETTER | FlagType::SETTER) {
        CompletionKind::Function
    } else {
        CompletionKind::Variable
    }
}

/// Get all project types, optionally filtered by a query.
///
/// # Arguments
/// * `context` - The resolver context
/// * `query` - Optional search query (case-insensitive substring match)
///
/// # Returns
/// List of matching types, sorted by qualified name.
pub fn workspace_symbols(context: &Context, query: Option<&str>) -> Vec<SymbolInfo> {
    let query_lower = query.map(|q| q.to_lowercase());
    let void_key = &context.features().void_key;

    let mut results: Vec<SymbolInfo> = context
        .all_project_classes()
        .iter()
        .filter(|item| item.name != *void_key)
        .filter(|item| match &query_lower {
            Some(q) => item.name.to_lowercase().contains(q.as_str()),
            None => true,
        })
        .map(|item| {
            let class = context.resolve_type(&item.type_name, None);
            SymbolInfo {
                name: Arc::from(class.name.as_str()),
                qualified_name: Arc::from(item.type_name.as_str()),
                kind: kind_of(item.flags),
                file: class.file.clone(),
                start_line: class.span.start.line,
                end_line: class.span.end.line,
            }
        })
        .collect();

    results.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
    results
}

/// Get the outline of a parsed file: types with their members, then
/// package-level declarations.
///
/// # Returns
/// List of symbols in the file, in source order.
pub fn document_symbols(file: &FileModel) -> Vec<SymbolInfo> {
    let mut results = Vec::new();
    for class in &file.classes {
        let qualified = class.qualified_name();
        let entry = class.to_member_model();
        results.push(SymbolInfo::from_member(&entry, &file.package, file));
        for member in class.members.iter() {
            results.push(SymbolInfo::from_member(member, &qualified, file));
        }
    }
    for member in file.members.iter() {
        results.push(SymbolInfo::from_member(member, &file.package, file));
    }

    // Sort by position in file
    results.sort_by_key(|s| s.start_line);
    results
}

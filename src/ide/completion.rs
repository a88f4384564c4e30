//! Completion suggestions implementation.

use rustc_hash::FxHashSet;
use std::sync::Arc;

use crate::context::Context;
use crate::model::{FlagType, MemberModel};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Package,
    Class,
    Interface,
    Variable,
    Function,
    Keyword,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Package => 9,    // Module
            CompletionKind::Class => 7,      // Class
            CompletionKind::Interface => 8,  // Interface
            CompletionKind::Variable => 6,   // Variable
            CompletionKind::Function => 3,   // Function
            CompletionKind::Keyword => 14,   // Keyword
        }
    }

    fn from_flags(flags: FlagType) -> Self {
        if flags.contains(FlagType::PACKAGE) {
            CompletionKind::Package
        } else if flags.contains(FlagType::INTERFACE) {
            CompletionKind::Interface
        } else if flags.contains(FlagType::CLASS) {
            CompletionKind::Class
        } else if flags.intersects(FlagType::FUNCTION | FlagType::GETTER | FlagType::SETTER) {
            CompletionKind::Function
        } else {
            CompletionKind::Variable
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a member entry.
    pub fn from_member(member: &MemberModel) -> Self {
        let mut item = Self::new(member.name.as_str(), CompletionKind::from_flags(member.flags));
        if !member.type_name.is_empty() && member.type_name != member.name {
            item.detail = Some(Arc::from(member.type_name.as_str()));
        }
        if let Some(ref doc) = member.comments {
            item.documentation = Some(Arc::from(doc.as_str()));
        }
        item
    }
}

const TOP_LEVEL_PRIORITY: u32 = 10;
const TYPE_PRIORITY: u32 = 30;
const PACKAGE_PRIORITY: u32 = 40;
const KEYWORD_PRIORITY: u32 = 60;

/// Get completion suggestions for an identifier prefix in the current file.
///
/// # Arguments
/// * `context` - The resolver context, with the current file set
/// * `prefix` - Typed prefix (matched case-insensitively, may be empty)
///
/// # Returns
/// Suggestions sorted by priority then label, one per label.
pub fn completions(context: &Context, prefix: &str) -> Vec<CompletionItem> {
    let prefix = prefix.to_lowercase();
    let matches = |name: &str| name.to_lowercase().starts_with(&prefix);
    let mut items = Vec::new();

    for member in context.top_level_elements().iter().filter(|m| matches(m.name.as_str())) {
        items.push(CompletionItem::from_member(member).with_priority(TOP_LEVEL_PRIORITY));
    }

    for member in context.visible_external_elements().iter().filter(|m| matches(m.name.as_str())) {
        let priority = if member.flags.contains(FlagType::PACKAGE) {
            PACKAGE_PRIORITY
        } else {
            TYPE_PRIORITY
        };
        items.push(CompletionItem::from_member(member).with_priority(priority));
    }

    for keyword in context.features().code_keywords.iter().copied() {
        if matches(keyword) {
            items.push(CompletionItem::new(keyword, CompletionKind::Keyword).with_priority(KEYWORD_PRIORITY));
        }
    }

    // Sort by priority
    items.sort_by(|a, b| {
        a.sort_priority
            .cmp(&b.sort_priority)
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
    });

    // Deduplicate by label, keeping the best ranked
    let mut seen = FxHashSet::default();
    items.retain(|item| seen.insert(item.label.clone()));

    items
}

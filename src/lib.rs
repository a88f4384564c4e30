//! # ascontext-base
//!
//! Core library for ActionScript-family classpath exploration, source model
//! caching and type resolution, as needed by completion and navigation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (completion, symbols)
//!   ↓
//! context   → Resolver state: classpath, current file, symbol cache
//!   ↓
//! project   → Classpath roots, file loading, SDK layout
//!   ↓
//! parser    → Logos lexer, declaration parser
//!   ↓
//! model     → File / class / member models
//!   ↓
//! base      → Primitives (Span/Position, identifier checks, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → parser → project → context → ide)
// ============================================================================

/// Foundation types: Span/Position, identifier checks, constants
pub mod base;

/// Source models: files, classes, members, flags
pub mod model;

/// Parser: Logos lexer, declaration-level parser
pub mod parser;

/// Project management: classpath roots, file loading, SDK roots
pub mod project;

/// Resolver context: type, package and import resolution
pub mod context;

/// IDE features: completion, document and workspace symbols
pub mod ide;

// Re-export foundation types
pub use base::{Position, Span, TextRange, TextSize};

// Re-export the main entry points
pub use context::{Context, ContextFeatures, ContextSettings, ContextSetup};
pub use model::{ClassModel, FileModel, FlagType, MemberList, MemberModel, Visibility};

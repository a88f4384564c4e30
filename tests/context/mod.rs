//! Resolver context tests
//!
//! Tests for:
//! - Type resolution order and classpath root precedence
//! - Import expansion and the symbol cache
//! - Package contents
//! - Root invalidation and re-parsing on file changes
//! - Typed indexes and literal tokens
//! - File/package consistency diagnostics

pub mod tests_diagnostics;
pub mod tests_reparse;
pub mod tests_resolution;
pub mod tests_tokens;
pub mod tests_typed_index;

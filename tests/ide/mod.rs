//! IDE feature tests
//!
//! Tests for:
//! - Code completion
//! - Document symbols
//! - Workspace symbols

pub mod tests_completion;
pub mod tests_symbols;

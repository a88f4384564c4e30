//! Foundation types for the resolver.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Line/column positions for model elements
//! - [`is_valid_token`], [`is_valid_package`] - Identifier checks for
//!   file and directory names found on a classpath
//! - Domain constants (file extensions, reserved names)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod ident;
mod position;

pub use ident::{is_valid_package, is_valid_token};
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};

//! Project layer tests
//!
//! Tests for:
//! - Classpath construction from settings, setup and SDK layouts
//! - Temporary roots for files outside the classpath
//! - Exploration of roots

pub mod tests_classpath;
pub mod tests_exploration;

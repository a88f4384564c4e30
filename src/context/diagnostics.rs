//! Diagnostics: model consistency warnings for the current file.

use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: PathBuf,
    /// Start line (0-indexed).
    pub start_line: u32,
    /// Start column (0-indexed).
    pub start_col: u32,
    /// End line (0-indexed).
    pub end_line: u32,
    /// End column (0-indexed).
    pub end_col: u32,
    pub severity: Severity,
    /// Warning code (e.g., "W0001").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
}

impl Diagnostic {
    fn new(severity: Severity, file: impl Into<PathBuf>, line: u32, message: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.into(),
            start_line: line,
            start_col: 0,
            end_line: line,
            end_col: 0,
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(file: impl Into<PathBuf>, line: u32, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, file, line, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(file: impl Into<PathBuf>, line: u32, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Warning, file, line, message)
    }

    /// Set the end of the range.
    pub fn with_span(mut self, end_line: u32, end_col: u32) -> Self {
        self.end_line = end_line;
        self.end_col = end_col;
        self
    }

    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes reported by model checks.
pub mod codes {
    /// Declared package does not match the file's directory.
    pub const PACKAGE_MISMATCH: &str = "W0001";
    /// Public type name does not match the file name.
    pub const TYPE_NAME_MISMATCH: &str = "W0002";
}

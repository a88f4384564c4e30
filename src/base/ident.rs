//! Identifier checks for names discovered on disk.
//!
//! Directory and file names only become packages and types when they are
//! valid identifiers: `[A-Za-z$_][A-Za-z0-9$_]*`, extended to Unicode letters.

use unicode_ident::{is_xid_continue, is_xid_start};

fn is_token_start(c: char) -> bool {
    c == '$' || c == '_' || is_xid_start(c)
}

fn is_token_continue(c: char) -> bool {
    c == '$' || is_xid_continue(c)
}

/// Returns true if `name` is a single identifier.
pub fn is_valid_token(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_token_start(c) => chars.all(is_token_continue),
        _ => false,
    }
}

/// Returns true if `name` is a dotted package path (`a.b.c`).
///
/// The root package (empty string) is valid.
pub fn is_valid_package(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_token_start(c) => chars.all(|c| c == '.' || is_token_continue(c)),
        _ => false,
    }
}

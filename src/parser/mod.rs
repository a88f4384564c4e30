//! Declaration parser for ActionScript-family sources
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Declaration parser → FileModel (package, imports, classes, members)
//! ```
//!
//! The resolver only needs declarations, so bodies are skipped and no syntax
//! tree is kept. AS2 class files (`class a.b.C {}`) and AS3 package files
//! (`package a.b { ... }`) are both accepted by the same parser.

mod declarations;
mod lexer;
mod token_kind;

pub use declarations::{ParseError, ParseResult, parse_source};
pub use lexer::{Lexer, Token, tokenize};
pub use token_kind::TokenKind;

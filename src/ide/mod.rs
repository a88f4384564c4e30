//! IDE features: high-level APIs for editor requests.
//!
//! Each function takes a [`Context`](crate::context::Context) (or a parsed
//! model) and returns plain data; conversion to protocol types happens at
//! the server boundary.
//!
//! ## Usage
//!
//! ```ignore
//! use ascontext::context::{Context, ContextSettings};
//! use ascontext::ide;
//!
//! let mut context = Context::as3(ContextSettings::default().with_user_classpath(["src"]));
//! context.set_current_file("src/com/acme/Main.as");
//!
//! let items = ide::completions(&context, "Wid");
//! ```

mod completion;
mod symbols;

pub use completion::{CompletionItem, CompletionKind, completions};
pub use symbols::{SymbolInfo, document_symbols, workspace_symbols};

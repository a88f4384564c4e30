//! Parsed source models.
//!
//! A [`FileModel`] is what the parser produces for one source file: its
//! package, its imports, its classes and its package-level members. The
//! resolver never mutates a file model once it is cached; derived data
//! (typed clones, expanded wildcards) lives in the context caches.

mod class;
mod file;
mod flags;
mod member;

pub use class::ClassModel;
pub use file::{FileModel, FileStamp};
pub use flags::{FlagType, Visibility};
pub use member::{MemberList, MemberModel};

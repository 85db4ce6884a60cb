//! Document Model - Rich document tree, paths, and structural invariants
//!
//! This crate provides the node model shared by the editing and export
//! crates: a tree of typed elements and marked-up text leaves, addressed by
//! position, plus the predicates that decide when a node shows placeholder
//! text.

mod node;
mod marks;
mod path;
mod selection;
mod document;
mod error;
pub mod placeholder;
pub mod validate;

pub use node::*;
pub use marks::*;
pub use path::*;
pub use selection::*;
pub use document::*;
pub use error::*;
pub use placeholder::{
    collect_placeholders, first_child_is_empty, is_empty_text_leaf, placeholder_slot,
    resolve_placeholder,
};
pub use validate::{validate, IssueKind, StructureIssue};

//! Edit Engine - Commands that turn one document snapshot into the next
//!
//! Every command reads an immutable snapshot plus the editor's selection and
//! returns a complete new snapshot. Nothing is mutated in place.

mod command;
mod error;
mod table_commands;

pub use command::*;
pub use error::*;
pub use table_commands::*;

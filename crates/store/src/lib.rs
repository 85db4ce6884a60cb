//! Store - Snapshot persistence, export settings, and DITA export
//!
//! This crate handles JSON snapshot serialization, file operations, the
//! export settings file, and conversion of a document into DITA XML.

mod serializer;
mod file_io;
mod error;
mod settings;
pub mod dita;

pub use serializer::*;
pub use file_io::*;
pub use error::*;
pub use settings::*;

pub use dita::{export_dita, DitaExporter, DITA_NAMESPACE, ROOT_TOPIC_ID, UNTITLED_TITLE};

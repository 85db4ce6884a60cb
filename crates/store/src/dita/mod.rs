//! DITA XML export
//!
//! Converts a document snapshot into a single DITA topic file. The root
//! topic holds the document title and the root-level blocks; every topic in
//! the document follows the root body as a nested topic, flattened so no
//! topic ever sits inside another topic's body.

mod builder;
mod inline;
pub mod xml;

pub use xml::{render_document, render_fragment, XmlElement, XmlNode};

use crate::{ExportSettings, Result};
use builder::Builder;
use doc_model::Document;

/// Default namespace carried by every `<topic>`
pub const DITA_NAMESPACE: &str = "http://dita.oasis-open.org/architecture/2005/";

/// Id of the root topic
pub const ROOT_TOPIC_ID: &str = "extended-dita-topic";

/// Title text for a topic with no title
pub const UNTITLED_TITLE: &str = "Untitled Title";

/// DITA exporter
pub struct DitaExporter {
    settings: ExportSettings,
}

impl DitaExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Build the output element tree without rendering it
    pub fn build(&self, doc: &Document) -> XmlElement {
        Builder::new(&self.settings).build(doc)
    }

    /// Export the document as an XML string
    pub fn export(&self, doc: &Document) -> Result<String> {
        let root = self.build(doc);
        render_document(&root, self.settings.indent_width)
    }
}

impl Default for DitaExporter {
    fn default() -> Self {
        Self::new(ExportSettings::default())
    }
}

/// Export `doc` as a DITA XML string
pub fn export_dita(doc: &Document, settings: &ExportSettings) -> Result<String> {
    let root = Builder::new(settings).build(doc);
    render_document(&root, settings.indent_width)
}

//! File I/O operations

use crate::{export_dita, ExportSettings, Result, StoreError};
use doc_model::Document;
use std::path::Path;

/// Save a snapshot as JSON
pub fn save_snapshot(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    let json = crate::to_json(doc)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a JSON snapshot
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path)?;
    crate::from_json(&json)
}

/// Export a snapshot as DITA XML to a file
pub fn export_dita_file(
    doc: &Document,
    path: impl AsRef<Path>,
    settings: &ExportSettings,
) -> Result<()> {
    let xml = export_dita(doc, settings)?;
    std::fs::write(path.as_ref(), xml)?;
    tracing::info!(path = %path.as_ref().display(), "wrote DITA export");
    Ok(())
}

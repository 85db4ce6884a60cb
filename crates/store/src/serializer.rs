//! Snapshot serialization
//!
//! The persisted form is a plain structural dump of the node model: a
//! pretty-printed JSON array of root blocks, exactly as the editor holds them.

use crate::Result;
use doc_model::Document;

/// Serialize a snapshot to pretty JSON
pub fn to_json(doc: &Document) -> Result<String> {
    let json = serde_json::to_string_pretty(doc)?;
    Ok(json)
}

/// Deserialize a snapshot from JSON
pub fn from_json(json: &str) -> Result<Document> {
    let doc = serde_json::from_str(json)?;
    Ok(doc)
}

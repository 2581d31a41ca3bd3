pub mod outline;
pub mod trace;

use std::path::Path;

use anyhow::{Context, Result};

use crate::document::Document;

/// Load a document for a command, naming the file on failure
pub fn load_document(path: &Path) -> Result<Document> {
    Document::load(path).with_context(|| format!("Cannot open '{}'", path.display()))
}

use std::path::Path;

use anyhow::Result;

use crate::commands::load_document;
use crate::document::Document;

/// One line per section: indented id, a tab, then the title
pub fn format_outline(document: &Document) -> String {
    let mut output = String::new();

    if document.sections().is_empty() {
        output.push_str("No sections found.\n");
        return output;
    }

    for section in document.sections() {
        let indent = "  ".repeat(usize::from(section.level.saturating_sub(1)));
        output.push_str(&format!("{}{}\t{}\n", indent, section.id, section.title));
    }
    output
}

pub fn run(path: &Path) -> Result<()> {
    let document = load_document(path)?;
    print!("{}", format_outline(&document));
    Ok(())
}

//! The document pane as seen by the tracker

use crate::document::Document;
use crate::spy::{ContentSurface, SectionBounds};

use super::viewport::Viewport;

/// Borrowed view of a document scrolled through a viewport
#[derive(Debug, Clone, Copy)]
pub struct ContentPane<'a> {
    document: &'a Document,
    viewport: &'a Viewport,
}

impl<'a> ContentPane<'a> {
    pub fn new(document: &'a Document, viewport: &'a Viewport) -> Self {
        Self { document, viewport }
    }
}

impl ContentSurface for ContentPane<'_> {
    fn scroll_offset(&self) -> u16 {
        self.viewport.offset()
    }

    fn visible_height(&self) -> u16 {
        self.viewport.height()
    }

    fn max_scroll_offset(&self) -> u16 {
        self.viewport.max_offset()
    }

    fn measure(&self, section_id: &str) -> Option<SectionBounds> {
        self.document
            .section(section_id)
            .map(|s| SectionBounds::at(s.y, s.height, self.viewport.offset()))
    }
}

//! Viewport over a column of rows
//!
//! Tracks the visible slice of some taller content and keeps the scroll
//! offset clamped. Used by both the document pane and the navigation menu.

use std::ops::Range;

/// Visible window into content of a known height
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Current scroll offset from top
    offset: u16,
    /// Height of the viewport (visible area)
    height: u16,
    /// Total height of the content
    content_height: u16,
}

impl Viewport {
    /// Create a new viewport, clamping `offset` to the scrollable range
    pub fn new(offset: u16, height: u16, content_height: u16) -> Self {
        Self {
            offset: offset.min(content_height.saturating_sub(height)),
            height,
            content_height,
        }
    }

    /// Get the range of visible rows
    pub fn visible_range(&self) -> Range<u16> {
        self.offset..self.offset.saturating_add(self.height).min(self.content_height)
    }

    /// Check if the rows `y..y + height` are fully inside the viewport
    pub fn is_fully_visible(&self, y: u16, height: u16) -> bool {
        y >= self.offset && y.saturating_add(height) <= self.offset.saturating_add(self.height)
    }

    /// Scroll as little as possible so that `y..y + height` is visible
    ///
    /// Nothing moves when the region is already fully visible. A region
    /// taller than the viewport is aligned to its top.
    pub fn ensure_visible(&mut self, y: u16, height: u16) {
        if self.is_fully_visible(y, height) {
            return;
        }
        let bottom = y.saturating_add(height);

        if y < self.offset {
            self.offset = y;
        } else if bottom > self.offset.saturating_add(self.height) {
            self.offset = bottom.saturating_sub(self.height).min(y);
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll up by a number of rows
    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Scroll down by a number of rows
    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset());
    }

    /// Scroll to the top of the content
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Scroll to the bottom of the content
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn content_height(&self) -> u16 {
        self.content_height
    }

    /// Largest valid offset (0 when the content fits)
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.height)
    }

    /// Set a new offset directly, clamped to the scrollable range
    pub fn set_offset(&mut self, offset: u16) {
        self.offset = offset.min(self.max_offset());
    }

    /// Set the viewport height (e.g., on terminal resize)
    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn is_at_top(&self) -> bool {
        self.offset == 0
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }
}

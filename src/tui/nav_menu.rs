//! Side navigation menu
//!
//! One row per section link. The menu scrolls independently of the
//! document: the tracker asks it to bring the current link into view, and
//! the menu eases there with [`SmoothScroll`].

use crate::document::Section;
use crate::spy::{NavigationMenu, ScrollBehavior, ScrollBlock, ScrollPolicy};

use super::smooth_scroll::SmoothScroll;
use super::viewport::Viewport;

/// Share of the remaining distance the menu covers per frame
const MENU_SCROLL_SPEED: f64 = 0.35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
    pub level: u8,
    pub current: bool,
}

#[derive(Debug, Clone)]
pub struct NavMenu {
    entries: Vec<MenuEntry>,
    /// Where the menu is heading
    viewport: Viewport,
    /// Where the menu is drawn
    scroll: SmoothScroll,
}

impl NavMenu {
    pub fn from_sections(sections: &[Section]) -> Self {
        let entries: Vec<MenuEntry> = sections
            .iter()
            .map(|section| MenuEntry {
                id: section.id.clone(),
                label: section.title.clone(),
                level: section.level,
                current: false,
            })
            .collect();
        let rows = row_index(entries.len());

        Self {
            entries,
            viewport: Viewport::new(0, 0, rows),
            scroll: SmoothScroll::new(MENU_SCROLL_SPEED),
        }
    }

    /// Link ids in menu order
    pub fn link_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Index of the current link
    pub fn current(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.current)
    }

    /// Rendered offset (may be mid-animation)
    pub fn offset(&self) -> u16 {
        self.scroll.offset()
    }

    /// Resize the visible area, clamping the offset without animating
    pub fn set_height(&mut self, height: u16) {
        self.viewport.set_height(height);
        if self.viewport.offset() != self.scroll.target() {
            self.scroll.jump_to(self.viewport.offset());
        }
    }

    pub fn tick(&mut self) {
        self.scroll.tick();
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }
}

impl NavigationMenu for NavMenu {
    fn set_current(&mut self, link: usize, current: bool) {
        if let Some(entry) = self.entries.get_mut(link) {
            entry.current = current;
        }
    }

    fn scroll_into_view(&mut self, link: usize, policy: ScrollPolicy) {
        if link >= self.entries.len() {
            return;
        }
        let y = row_index(link);

        match policy.block {
            ScrollBlock::Nearest => self.viewport.ensure_visible(y, 1),
            ScrollBlock::Start => self.viewport.set_offset(y),
            ScrollBlock::Center => {
                self.viewport.set_offset(y.saturating_sub(self.viewport.height() / 2))
            }
        }

        let target = self.viewport.offset();
        match policy.behavior {
            ScrollBehavior::Smooth => self.scroll.retarget(target),
            ScrollBehavior::Instant => self.scroll.jump_to(target),
        }
    }
}

fn row_index(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

//! Viewer state and action handling
//!
//! `App` owns the document pane, the navigation menu and the tracker that
//! links them. Any action that changes the pane's offset is a scroll event
//! and runs the tracker exactly once.

use ratatui::layout::Rect;

use crate::config::Config;
use crate::document::Document;
use crate::spy::ViewportTracker;

use super::action::Action;
use super::content::ContentPane;
use super::nav_menu::NavMenu;
use super::view::AppLayout;
use super::viewport::Viewport;

pub struct App {
    document: Document,
    content: Viewport,
    menu: NavMenu,
    tracker: ViewportTracker,
    config: Config,
    should_quit: bool,
}

impl App {
    pub fn new(document: Document, config: Config) -> Self {
        let menu = NavMenu::from_sections(document.sections());
        let content = Viewport::new(0, 0, document.height());
        let tracker = ViewportTracker::new(document.section_ids(), &menu.link_ids())
            .starting_at(content.offset())
            .with_thresholds(config.spy.thresholds())
            .with_policy(config.spy.menu_policy());

        Self {
            document,
            content,
            menu,
            tracker,
            config,
            should_quit: false,
        }
    }

    /// Lay out for a terminal of the given size and highlight the current section
    pub fn resize(&mut self, width: u16, height: u16) {
        let layout = AppLayout::new(Rect::new(0, 0, width, height), self.config.menu_width);
        self.content.set_height(layout.content.height);
        self.menu.set_height(layout.menu.height);
        tracing::debug!(
            "LAYOUT: content {}x{} menu {}x{}",
            layout.content.width,
            layout.content.height,
            layout.menu.width,
            layout.menu.height
        );
        self.update_tracker();
    }

    pub fn dispatch(&mut self, action: Action) {
        let before = self.content.offset();

        match action {
            Action::ScrollDown(lines) => self.content.scroll_down(lines),
            Action::ScrollUp(lines) => self.content.scroll_up(lines),
            Action::PageDown => self.content.scroll_down(self.page_size()),
            Action::PageUp => self.content.scroll_up(self.page_size()),
            Action::ScrollToTop => self.content.scroll_to_top(),
            Action::ScrollToBottom => self.content.scroll_to_bottom(),
            Action::NextSection => {
                if let Some(y) = self.next_section_y(before) {
                    self.content.set_offset(y);
                }
            }
            Action::PreviousSection => {
                if let Some(y) = self.previous_section_y(before) {
                    self.content.set_offset(y);
                }
            }
            Action::JumpToSection(index) => {
                if let Some(section) = self.document.sections().get(index) {
                    self.content.set_offset(section.y);
                }
            }
            Action::Resize(width, height) => self.resize(width, height),
            Action::Tick => self.menu.tick(),
            Action::Quit => self.should_quit = true,
        }

        if action.is_scroll() && self.content.offset() != before {
            self.update_tracker();
        }
    }

    /// Run the tracker against the current pane geometry
    fn update_tracker(&mut self) {
        let pane = ContentPane::new(&self.document, &self.content);
        self.tracker.evaluate(&pane, &mut self.menu);
    }

    fn page_size(&self) -> u16 {
        self.content.height().saturating_sub(1).max(1)
    }

    /// First section starting below `offset`
    fn next_section_y(&self, offset: u16) -> Option<u16> {
        self.document
            .sections()
            .iter()
            .map(|s| s.y)
            .find(|y| *y > offset)
    }

    /// Last section starting above `offset`
    fn previous_section_y(&self, offset: u16) -> Option<u16> {
        self.document
            .sections()
            .iter()
            .map(|s| s.y)
            .filter(|y| *y < offset)
            .last()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_animating(&self) -> bool {
        self.menu.is_animating()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn content(&self) -> &Viewport {
        &self.content
    }

    pub fn menu(&self) -> &NavMenu {
        &self.menu
    }

    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

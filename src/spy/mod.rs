//! Scroll-synchronized section tracking
//!
//! Keeps a navigation menu's current entry in step with the document section
//! the reader is looking at. The tracker only reads geometry through
//! [`ContentSurface`] and only writes through [`NavigationMenu`], so any host
//! (the terminal viewer in [`crate::tui`], a headless replay, a test double)
//! can drive it.

pub mod geometry;
pub mod tracker;

use thiserror::Error;

pub use geometry::{FocusBand, ScrollDirection, SectionBounds, Thresholds};
pub use tracker::{select_active, ViewportTracker};

/// Errors raised while configuring a tracker
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpyError {
    #[error("Threshold {0} is outside 0.0..=1.0")]
    ThresholdOutOfRange(f64),

    #[error("Down threshold {down} is greater than up threshold {up}")]
    InvertedThresholds { down: f64, up: f64 },
}

/// The scrollable content region sections live in
pub trait ContentSurface {
    /// Current scroll offset from the top of the content
    fn scroll_offset(&self) -> u16;

    /// Height of the visible window
    fn visible_height(&self) -> u16;

    /// Largest offset the surface can scroll to (0 when content fits)
    fn max_scroll_offset(&self) -> u16;

    /// Measure a section relative to the visible window's top edge
    ///
    /// Called on every evaluation since layout may shift between scrolls.
    /// Returns `None` when the section cannot be measured yet.
    fn measure(&self, section_id: &str) -> Option<SectionBounds>;
}

/// The navigation link list the tracker highlights
pub trait NavigationMenu {
    /// Set or clear the current flag on the link at `link`
    fn set_current(&mut self, link: usize, current: bool);

    /// Bring the link at `link` into view inside the menu's own scroll region
    fn scroll_into_view(&mut self, link: usize, policy: ScrollPolicy);
}

/// Where an element should land when scrolled into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    /// Move as little as possible; no movement if already visible
    #[default]
    Nearest,
    /// Align with the top edge
    Start,
    /// Center in the visible region
    Center,
}

/// How the scroll is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Scroll-into-view request passed to [`NavigationMenu::scroll_into_view`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPolicy {
    pub block: ScrollBlock,
    pub behavior: ScrollBehavior,
}

impl ScrollPolicy {
    /// Nearest edge with smooth motion
    pub const NEAREST_SMOOTH: ScrollPolicy = ScrollPolicy {
        block: ScrollBlock::Nearest,
        behavior: ScrollBehavior::Smooth,
    };

    /// Nearest edge, jumping immediately
    pub const NEAREST_INSTANT: ScrollPolicy = ScrollPolicy {
        block: ScrollBlock::Nearest,
        behavior: ScrollBehavior::Instant,
    };
}

/// Viewer actions
///
/// Every user input becomes one of these before it touches state. Actions
/// that move the document pane count as scroll events for the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Scrolling
    ScrollDown(u16),
    ScrollUp(u16),
    PageDown,
    PageUp,
    ScrollToTop,
    ScrollToBottom,

    // Anchor navigation
    NextSection,
    PreviousSection,
    JumpToSection(usize),

    /// Terminal resized to (width, height)
    Resize(u16, u16),

    /// Advance animations by one frame
    Tick,

    Quit,
}

impl Action {
    /// Whether this action can move the document pane
    pub fn is_scroll(&self) -> bool {
        !matches!(self, Action::Tick | Action::Quit | Action::Resize(..))
    }
}

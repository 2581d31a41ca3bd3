//! Rendering of the navigation menu, document pane and status line

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::ThemeConfig;
use crate::document::RowKind;

use super::app::App;
use super::nav_menu::NavMenu;

/// Marker drawn before the current menu entry
const CURRENT_MARKER: &str = "▸";

/// Screen areas of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Menu column, inside its border
    pub menu: Rect,
    /// Vertical rule between menu and content
    pub separator: Rect,
    pub content: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Menu on the left (at most half the width), status line at the bottom
    pub fn new(area: Rect, menu_width: u16) -> Self {
        let body_height = area.height.saturating_sub(1);
        let column = menu_width.min(area.width / 2);

        let menu = Rect::new(area.x, area.y, column.saturating_sub(1), body_height);
        let separator = Rect::new(area.x, area.y, column, body_height);
        let content = Rect::new(
            area.x + column,
            area.y,
            area.width.saturating_sub(column),
            body_height,
        );
        let status = Rect::new(area.x, area.y + body_height, area.width, area.height.min(1));

        Self {
            menu,
            separator,
            content,
            status,
        }
    }
}

/// Draw the whole viewer
pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let layout = AppLayout::new(area, app.config().menu_width);
    let theme = &app.config().theme;

    Block::new().borders(Borders::RIGHT).render(layout.separator, buf);
    render_menu(app.menu(), layout.menu, buf, theme);
    render_content(app, layout.content, buf, theme);
    render_status(app, layout.status, buf);
}

/// Draw the visible slice of the navigation menu
pub fn render_menu(menu: &NavMenu, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
    let first = usize::from(menu.offset());
    let visible = menu.entries().iter().skip(first).take(usize::from(area.height));

    for (row, entry) in visible.enumerate() {
        let y = area.y + row as u16;
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
        let marker = if entry.current { CURRENT_MARKER } else { " " };
        let text = truncate(&format!("{}{}{}", marker, indent, entry.label), area.width);

        let style = if entry.current {
            Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        buf.set_stringn(area.x, y, &text, usize::from(area.width), style);
    }
}

/// Draw the visible rows of the document
pub fn render_content(app: &App, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
    let content_x = area.x + 1;
    let width = usize::from(area.width.saturating_sub(1));
    let range = app.content().visible_range();
    let rows = app.document().rows();

    for (row, y) in (range.start..range.end).enumerate() {
        let Some(line) = rows.get(usize::from(y)) else {
            break;
        };
        let style = match line.kind {
            RowKind::Heading(_) => Style::default().fg(theme.heading_fg()).add_modifier(Modifier::BOLD),
            RowKind::Underline(_) => Style::default().fg(theme.heading_fg()),
            RowKind::Body => Style::default(),
        };
        buf.set_stringn(content_x, area.y + row as u16, &line.text, width, style);
    }
}

/// Draw the status line: active section and reading position
pub fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let title = app
        .tracker()
        .active_index()
        .and_then(|i| app.document().sections().get(i))
        .map(|s| s.title.as_str())
        .unwrap_or("-");
    let text = format!(" {} | {}", title, progress_label(app));

    let style = Style::default().add_modifier(Modifier::REVERSED);
    buf.set_style(area, style);
    buf.set_stringn(area.x, area.y, &text, usize::from(area.width), style);
}

/// `All` when everything fits, `Top`/`Bot` at either end, else percent scrolled
fn progress_label(app: &App) -> String {
    let viewport = app.content();
    match (viewport.is_at_top(), viewport.is_at_bottom()) {
        (true, true) => "All".to_string(),
        (true, false) => "Top".to_string(),
        (false, true) => "Bot".to_string(),
        (false, false) => {
            let percent = u32::from(viewport.offset()) * 100 / u32::from(viewport.max_offset());
            format!("{}%", percent)
        }
    }
}

/// Cut `text` to `width` columns, ending with '…' when shortened
fn truncate(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

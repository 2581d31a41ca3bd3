//! Replay scroll offsets through the tracker without a terminal
//!
//! Useful for checking how a document's headings will highlight at a given
//! pane height before opening the viewer.

use std::path::Path;

use anyhow::{bail, Result};

use crate::commands::load_document;
use crate::document::Document;
use crate::spy::{ScrollDirection, ScrollPolicy, Thresholds, ViewportTracker};
use crate::tui::{ContentPane, NavMenu, Viewport};

/// One replayed scroll event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Offset after clamping to the document
    pub offset: u16,
    pub direction: ScrollDirection,
    pub active: Option<String>,
}

/// Evaluate the tracker once at the initial offset, then once per offset
pub fn replay(document: &Document, height: u16, offsets: &[u16], thresholds: Thresholds) -> Vec<TraceStep> {
    let mut viewport = Viewport::new(0, height, document.height());
    let mut menu = NavMenu::from_sections(document.sections());
    menu.set_height(height);
    let mut tracker = ViewportTracker::new(document.section_ids(), &menu.link_ids())
        .starting_at(viewport.offset())
        .with_thresholds(thresholds)
        .with_policy(ScrollPolicy::NEAREST_INSTANT);

    let mut steps = Vec::with_capacity(offsets.len() + 1);
    let mut evaluate = |viewport: &Viewport, menu: &mut NavMenu| {
        let pane = ContentPane::new(document, viewport);
        let active = tracker.evaluate(&pane, menu).map(str::to_string);
        TraceStep {
            offset: viewport.offset(),
            direction: tracker.direction(),
            active,
        }
    };

    steps.push(evaluate(&viewport, &mut menu));
    for offset in offsets {
        viewport.set_offset(*offset);
        steps.push(evaluate(&viewport, &mut menu));
    }
    steps
}

pub fn format_trace(steps: &[TraceStep]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:>6}  {:<4}  {}\n", "OFFSET", "DIR", "ACTIVE"));
    for step in steps {
        output.push_str(&format!(
            "{:>6}  {:<4}  {}\n",
            step.offset,
            step.direction,
            step.active.as_deref().unwrap_or("-")
        ));
    }
    output
}

pub fn run(path: &Path, height: u16, offsets: &[u16], thresholds: Thresholds) -> Result<()> {
    if height == 0 {
        bail!("Pane height must be at least 1");
    }
    let document = load_document(path)?;
    let steps = replay(&document, height, offsets, thresholds);
    print!("{}", format_trace(&steps));
    Ok(())
}

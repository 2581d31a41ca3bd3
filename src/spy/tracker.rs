//! Section tracker driven by scroll events
//!
//! Decides which section is "current" for a scroll offset and mirrors that
//! decision onto the navigation menu. Scrolling down and scrolling up use
//! different boundaries so the highlight does not flicker when the reader
//! hovers around a section edge.

use std::collections::HashMap;

use super::geometry::{FocusBand, ScrollDirection, SectionBounds, Thresholds};
use super::{ContentSurface, NavigationMenu, ScrollPolicy};

/// Pick the active section for one measurement
///
/// `bounds` are in document order and relative to the same origin as `band`.
/// Returns `None` only when there are no sections.
///
/// Scrolling down, the first section that has not yet passed the top of the
/// window wins if its top sits above the down threshold; otherwise the
/// section before it is still being read. If every section has passed the
/// top edge, the last one is active.
///
/// Scrolling up, the last section whose bottom sits above the up threshold
/// wins. The first section always qualifies.
pub fn select_active(
    direction: ScrollDirection,
    band: FocusBand,
    bounds: &[SectionBounds],
    thresholds: &Thresholds,
) -> Option<usize> {
    if bounds.is_empty() {
        return None;
    }

    match direction {
        ScrollDirection::Down => {
            let limit = band.line_at(thresholds.down());
            for (i, section) in bounds.iter().enumerate() {
                if section.top >= band.top {
                    if i == 0 || f64::from(section.top) < limit {
                        return Some(i);
                    }
                    return Some(i - 1);
                }
            }
            Some(bounds.len() - 1)
        }
        ScrollDirection::Up => {
            let limit = band.line_at(thresholds.up());
            let found = bounds
                .iter()
                .enumerate()
                .rev()
                .find(|(i, section)| *i == 0 || f64::from(section.bottom) < limit)
                .map(|(i, _)| i);
            Some(found.unwrap_or(0))
        }
    }
}

/// Tracks the current section of one scrolling surface
///
/// Owns the previous scroll offset so several trackers (one per document)
/// can run side by side.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    /// Section ids in document order
    sections: Vec<String>,
    /// Section id -> index into the navigation menu
    links: HashMap<String, usize>,
    link_count: usize,
    last_offset: u16,
    direction: ScrollDirection,
    active: Option<usize>,
    thresholds: Thresholds,
    policy: ScrollPolicy,
}

impl ViewportTracker {
    /// Create a tracker for a fixed list of sections and navigation links
    ///
    /// Links whose id matches no section are kept in the link count (they are
    /// cleared on every evaluation) but can never become current.
    pub fn new<S: Into<String>>(section_ids: impl IntoIterator<Item = S>, link_ids: &[String]) -> Self {
        let sections: Vec<String> = section_ids.into_iter().map(Into::into).collect();

        let mut links = HashMap::with_capacity(link_ids.len());
        for (index, id) in link_ids.iter().enumerate() {
            if links.contains_key(id) {
                tracing::warn!("SPY: duplicate navigation link '{}' at {}, keeping first", id, index);
                continue;
            }
            if !sections.contains(id) {
                tracing::debug!("SPY: navigation link '{}' has no matching section", id);
            }
            links.insert(id.clone(), index);
        }

        for id in &sections {
            if !links.contains_key(id) {
                tracing::debug!("SPY: section '{}' has no navigation link", id);
            }
        }

        Self {
            sections,
            links,
            link_count: link_ids.len(),
            last_offset: 0,
            direction: ScrollDirection::Down,
            active: None,
            thresholds: Thresholds::default(),
            policy: ScrollPolicy::NEAREST_SMOOTH,
        }
    }

    /// Seed the previous offset with the surface's offset when tracking starts
    pub fn starting_at(mut self, offset: u16) -> Self {
        self.last_offset = offset;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Policy used when scrolling the current link into view
    pub fn with_policy(mut self, policy: ScrollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Handle one scroll event (or the initial measurement)
    ///
    /// Returns the id of the active section. With no sections this is a
    /// no-op: no link is touched and nothing is scrolled.
    pub fn evaluate<S, M>(&mut self, surface: &S, menu: &mut M) -> Option<&str>
    where
        S: ContentSurface + ?Sized,
        M: NavigationMenu + ?Sized,
    {
        let offset = surface.scroll_offset();
        self.direction = ScrollDirection::between(self.last_offset, offset);
        self.last_offset = offset;

        if self.sections.is_empty() {
            return None;
        }

        let measured: Option<Vec<SectionBounds>> =
            self.sections.iter().map(|id| surface.measure(id)).collect();
        let Some(bounds) = measured else {
            tracing::debug!("SPY: sections not measurable at offset {}, skipping", offset);
            return self.active();
        };

        let band = FocusBand::new(0, surface.visible_height());
        let selected = self
            .pinned_section(surface)
            .or_else(|| select_active(self.direction, band, &bounds, &self.thresholds));

        tracing::trace!(
            "SPY: offset={} direction={} selected={:?}",
            offset,
            self.direction,
            selected
        );

        if selected != self.active {
            tracing::debug!(
                "SPY: active section {:?} -> {:?}",
                self.active.map(|i| &self.sections[i]),
                selected.map(|i| &self.sections[i])
            );
        }
        self.active = selected;
        self.highlight(menu);

        self.active()
    }

    /// First/last section at the very top/bottom of the surface
    fn pinned_section<S: ContentSurface + ?Sized>(&self, surface: &S) -> Option<usize> {
        let offset = surface.scroll_offset();
        if offset == 0 {
            Some(0)
        } else if offset >= surface.max_scroll_offset() {
            Some(self.sections.len() - 1)
        } else {
            None
        }
    }

    fn highlight<M: NavigationMenu + ?Sized>(&self, menu: &mut M) {
        let target = self
            .active
            .and_then(|i| self.links.get(&self.sections[i]))
            .copied();

        for link in 0..self.link_count {
            menu.set_current(link, Some(link) == target);
        }

        if let Some(link) = target {
            menu.scroll_into_view(link, self.policy);
        }
    }

    /// Id of the active section, if any evaluation has selected one
    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.sections[i].as_str())
    }

    /// Index of the active section in document order
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Direction derived by the latest evaluation
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spy::{ScrollBehavior, ScrollBlock};

    /// Surface with fixed anchors laid out on a single column of rows
    struct FakeSurface {
        offset: u16,
        height: u16,
        content_height: u16,
        anchors: Vec<(String, u16, u16)>,
    }

    impl FakeSurface {
        fn new(height: u16, content_height: u16, anchors: &[(&str, u16)]) -> Self {
            Self {
                offset: 0,
                height,
                content_height,
                anchors: anchors
                    .iter()
                    .map(|(id, y)| (id.to_string(), *y, 2))
                    .collect(),
            }
        }

        fn ids(&self) -> Vec<String> {
            self.anchors.iter().map(|(id, _, _)| id.clone()).collect()
        }
    }

    impl ContentSurface for FakeSurface {
        fn scroll_offset(&self) -> u16 {
            self.offset
        }

        fn visible_height(&self) -> u16 {
            self.height
        }

        fn max_scroll_offset(&self) -> u16 {
            self.content_height.saturating_sub(self.height)
        }

        fn measure(&self, section_id: &str) -> Option<SectionBounds> {
            self.anchors
                .iter()
                .find(|(id, _, _)| id == section_id)
                .map(|(_, y, h)| SectionBounds::at(*y, *h, self.offset))
        }
    }

    #[derive(Default)]
    struct RecordingMenu {
        current: Vec<bool>,
        scrolled: Vec<(usize, ScrollPolicy)>,
    }

    impl RecordingMenu {
        fn with_links(count: usize) -> Self {
            Self {
                current: vec![false; count],
                scrolled: Vec::new(),
            }
        }

        fn current_links(&self) -> Vec<usize> {
            self.current
                .iter()
                .enumerate()
                .filter(|(_, c)| **c)
                .map(|(i, _)| i)
                .collect()
        }
    }

    impl NavigationMenu for RecordingMenu {
        fn set_current(&mut self, link: usize, current: bool) {
            self.current[link] = current;
        }

        fn scroll_into_view(&mut self, link: usize, policy: ScrollPolicy) {
            self.scrolled.push((link, policy));
        }
    }

    fn long_document() -> FakeSurface {
        FakeSurface::new(
            40,
            220,
            &[("intro", 0), ("setup", 30), ("usage", 45), ("api", 100), ("faq", 160)],
        )
    }

    fn abc_bounds(offset: i32) -> Vec<SectionBounds> {
        vec![
            SectionBounds::new(-offset, 100 - offset),
            SectionBounds::new(100 - offset, 400 - offset),
            SectionBounds::new(400 - offset, 1000 - offset),
        ]
    }

    const BAND: FocusBand = FocusBand { top: 0, height: 200 };

    #[test]
    fn test_select_down_section_within_threshold() {
        // B's top at 60, under 0.4 * 200 = 80
        let bounds = abc_bounds(40);
        let selected = select_active(ScrollDirection::Down, BAND, &bounds, &Thresholds::default());
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn test_select_down_picks_previous_past_threshold() {
        // A's top at 50 is the first at or below the top edge
        let bounds = abc_bounds(-50);
        let selected = select_active(ScrollDirection::Down, BAND, &bounds, &Thresholds::default());
        assert_eq!(selected, Some(0));

        // B's top at 90: first below the edge, but past 80, so A is still read
        let bounds = abc_bounds(10);
        let selected = select_active(ScrollDirection::Down, BAND, &bounds, &Thresholds::default());
        assert_eq!(selected, Some(0));
    }

    #[test]
    fn test_select_up_bottom_within_threshold() {
        // B's bottom at 110, under 0.6 * 200 = 120
        let bounds = abc_bounds(290);
        let selected = select_active(ScrollDirection::Up, BAND, &bounds, &Thresholds::default());
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn test_select_up_falls_back_to_first() {
        // Nothing has its bottom above 120 except A itself
        let bounds = abc_bounds(0);
        let selected = select_active(ScrollDirection::Up, BAND, &bounds, &Thresholds::default());
        assert_eq!(selected, Some(0));
    }

    #[test]
    fn test_select_down_everything_passed_picks_last() {
        let bounds = abc_bounds(800);
        let selected = select_active(ScrollDirection::Down, BAND, &bounds, &Thresholds::default());
        assert_eq!(selected, Some(2));
    }

    #[test]
    fn test_select_hysteresis_band_differs_by_direction() {
        // B's top at 90 and bottom at 390: down keeps A, up also keeps A
        // until B's bottom clears 120
        let bounds = abc_bounds(10);
        let thresholds = Thresholds::default();
        assert_eq!(select_active(ScrollDirection::Down, BAND, &bounds, &thresholds), Some(0));
        assert_eq!(select_active(ScrollDirection::Up, BAND, &bounds, &thresholds), Some(0));

        // B's top at 70: down switches to B
        let bounds = abc_bounds(30);
        assert_eq!(select_active(ScrollDirection::Down, BAND, &bounds, &thresholds), Some(1));
    }

    #[test]
    fn test_select_empty() {
        assert_eq!(
            select_active(ScrollDirection::Down, BAND, &[], &Thresholds::default()),
            None
        );
        assert_eq!(
            select_active(ScrollDirection::Up, BAND, &[], &Thresholds::default()),
            None
        );
    }

    #[test]
    fn test_select_custom_thresholds() {
        // B's top at 60 is past a 0.25 * 200 = 50 boundary
        let thresholds = Thresholds::new(0.25, 0.75).unwrap();
        let bounds = abc_bounds(40);
        assert_eq!(select_active(ScrollDirection::Down, BAND, &bounds, &thresholds), Some(0));
    }

    #[test]
    fn test_evaluate_marks_exactly_one_link() {
        let mut surface = long_document();
        let ids = surface.ids();
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        let mut menu = RecordingMenu::with_links(ids.len());

        for offset in 0..=surface.max_scroll_offset() {
            surface.offset = offset;
            tracker.evaluate(&surface, &mut menu);
            assert_eq!(menu.current_links().len(), 1, "offset {}", offset);
        }
    }

    #[test]
    fn test_evaluate_initial_load_selects_first() {
        let surface = long_document();
        let ids = surface.ids();
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        let mut menu = RecordingMenu::with_links(ids.len());

        assert_eq!(tracker.evaluate(&surface, &mut menu), Some("intro"));
        assert_eq!(menu.current_links(), vec![0]);
        assert_eq!(menu.scrolled, vec![(0, ScrollPolicy::NEAREST_SMOOTH)]);
    }

    #[test]
    fn test_evaluate_monotonic_scrolling_down() {
        let mut surface = long_document();
        let ids = surface.ids();
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        let mut menu = RecordingMenu::with_links(ids.len());

        let mut seen = Vec::new();
        for offset in 0..=surface.max_scroll_offset() {
            surface.offset = offset;
            tracker.evaluate(&surface, &mut menu);
            seen.push(tracker.active_index().unwrap());
        }

        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "regressed: {:?}", seen);
        for index in 0..ids.len() {
            assert!(seen.contains(&index), "section {} never active", index);
        }
        assert_eq!(tracker.active(), Some("faq"));
    }

    #[test]
    fn test_evaluate_monotonic_scrolling_up() {
        let mut surface = long_document();
        let max = surface.max_scroll_offset();
        let ids = surface.ids();
        surface.offset = max;
        let mut tracker = ViewportTracker::new(ids.clone(), &ids).starting_at(max);
        let mut menu = RecordingMenu::with_links(ids.len());

        let mut seen = Vec::new();
        for offset in (0..=max).rev() {
            surface.offset = offset;
            tracker.evaluate(&surface, &mut menu);
            seen.push(tracker.active_index().unwrap());
        }

        assert!(seen.windows(2).all(|w| w[0] >= w[1]), "regressed: {:?}", seen);
        assert_eq!(seen.first(), Some(&(ids.len() - 1)));
        assert_eq!(tracker.active(), Some("intro"));
    }

    #[test]
    fn test_evaluate_direction_tracking() {
        let mut surface = long_document();
        let ids = surface.ids();
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        let mut menu = RecordingMenu::with_links(ids.len());

        surface.offset = 50;
        tracker.evaluate(&surface, &mut menu);
        assert_eq!(tracker.direction(), ScrollDirection::Down);

        surface.offset = 20;
        tracker.evaluate(&surface, &mut menu);
        assert_eq!(tracker.direction(), ScrollDirection::Up);

        tracker.evaluate(&surface, &mut menu);
        assert_eq!(tracker.direction(), ScrollDirection::Down);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut surface = long_document();
        let ids = surface.ids();
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        let mut menu = RecordingMenu::with_links(ids.len());

        surface.offset = 37;
        let first = tracker.evaluate(&surface, &mut menu).map(str::to_string);
        let second = tracker.evaluate(&surface, &mut menu).map(str::to_string);
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("usage"));
    }

    #[test]
    fn test_evaluate_pins_top_regardless_of_direction() {
        // Short sections all fit above the up threshold at offset 0
        let mut surface = FakeSurface::new(40, 60, &[("a", 0), ("b", 4), ("c", 8)]);
        let ids = surface.ids();
        surface.offset = 10;
        let mut tracker = ViewportTracker::new(ids.clone(), &ids).starting_at(10);
        let mut menu = RecordingMenu::with_links(ids.len());

        surface.offset = 0;
        assert_eq!(tracker.evaluate(&surface, &mut menu), Some("a"));
        assert_eq!(tracker.direction(), ScrollDirection::Up);
    }

    #[test]
    fn test_evaluate_pins_bottom() {
        // At the bottom, "c" is still below the down threshold
        let mut surface = FakeSurface::new(40, 70, &[("a", 0), ("b", 10), ("c", 60)]);
        let ids = surface.ids();
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        let mut menu = RecordingMenu::with_links(ids.len());

        surface.offset = surface.max_scroll_offset();
        assert_eq!(tracker.evaluate(&surface, &mut menu), Some("c"));
    }

    #[test]
    fn test_evaluate_single_section_always_active() {
        let mut surface = FakeSurface::new(20, 100, &[("only", 5)]);
        let ids = surface.ids();
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        let mut menu = RecordingMenu::with_links(1);

        for offset in (0..=surface.max_scroll_offset()).chain((0..=surface.max_scroll_offset()).rev()) {
            surface.offset = offset;
            assert_eq!(tracker.evaluate(&surface, &mut menu), Some("only"));
            assert_eq!(menu.current_links(), vec![0]);
        }
    }

    #[test]
    fn test_evaluate_no_sections_is_noop() {
        let mut surface = FakeSurface::new(20, 100, &[]);
        let mut tracker = ViewportTracker::new(Vec::<String>::new(), &[]);
        let mut menu = RecordingMenu::default();

        for offset in [0, 40, 10] {
            surface.offset = offset;
            assert_eq!(tracker.evaluate(&surface, &mut menu), None);
        }
        assert!(menu.current.is_empty());
        assert!(menu.scrolled.is_empty());
    }

    #[test]
    fn test_evaluate_maps_links_by_id() {
        let surface = long_document();
        let links = vec![
            "changelog".to_string(),
            "faq".to_string(),
            "intro".to_string(),
        ];
        let mut tracker = ViewportTracker::new(surface.ids(), &links);
        let mut menu = RecordingMenu::with_links(links.len());

        tracker.evaluate(&surface, &mut menu);
        assert_eq!(menu.current_links(), vec![2]);
        assert_eq!(menu.scrolled.last().map(|(link, _)| *link), Some(2));
    }

    #[test]
    fn test_evaluate_section_without_link_clears_menu() {
        let mut surface = long_document();
        let links = vec!["intro".to_string()];
        let mut tracker = ViewportTracker::new(surface.ids(), &links);
        let mut menu = RecordingMenu::with_links(1);

        tracker.evaluate(&surface, &mut menu);
        assert_eq!(menu.current_links(), vec![0]);

        surface.offset = surface.max_scroll_offset();
        assert_eq!(tracker.evaluate(&surface, &mut menu), Some("faq"));
        assert!(menu.current_links().is_empty());
        assert_eq!(menu.scrolled.len(), 1);
    }

    #[test]
    fn test_duplicate_link_keeps_first() {
        let surface = long_document();
        let links = vec!["intro".to_string(), "intro".to_string()];
        let mut tracker = ViewportTracker::new(surface.ids(), &links);
        let mut menu = RecordingMenu::with_links(2);

        tracker.evaluate(&surface, &mut menu);
        assert_eq!(menu.current_links(), vec![0]);
    }

    #[test]
    fn test_evaluate_skips_unmeasurable_sections() {
        let mut surface = long_document();
        let mut ids = surface.ids();
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        let mut menu = RecordingMenu::with_links(ids.len() + 1);

        tracker.evaluate(&surface, &mut menu);
        assert_eq!(tracker.active(), Some("intro"));

        ids.push("missing".to_string());
        let mut tracker = ViewportTracker::new(ids.clone(), &ids);
        surface.offset = 60;
        assert_eq!(tracker.evaluate(&surface, &mut menu), None);
        assert_eq!(tracker.direction(), ScrollDirection::Down);
    }

    #[test]
    fn test_custom_policy_is_forwarded() {
        let surface = long_document();
        let ids = surface.ids();
        let policy = ScrollPolicy {
            block: ScrollBlock::Center,
            behavior: ScrollBehavior::Instant,
        };
        let mut tracker = ViewportTracker::new(ids.clone(), &ids).with_policy(policy);
        let mut menu = RecordingMenu::with_links(ids.len());

        tracker.evaluate(&surface, &mut menu);
        assert_eq!(menu.scrolled, vec![(0, policy)]);
    }

    #[test]
    fn test_independent_trackers() {
        let mut first = long_document();
        let mut second = long_document();
        let ids = first.ids();
        let mut a = ViewportTracker::new(ids.clone(), &ids);
        let mut b = ViewportTracker::new(ids.clone(), &ids);
        let mut menu_a = RecordingMenu::with_links(ids.len());
        let mut menu_b = RecordingMenu::with_links(ids.len());

        first.offset = 120;
        second.offset = 0;
        a.evaluate(&first, &mut menu_a);
        b.evaluate(&second, &mut menu_b);

        first.offset = 110;
        second.offset = 5;
        a.evaluate(&first, &mut menu_a);
        b.evaluate(&second, &mut menu_b);

        assert_eq!(a.direction(), ScrollDirection::Up);
        assert_eq!(b.direction(), ScrollDirection::Down);
    }
}

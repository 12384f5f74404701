//! Scroll-driven page state: reveal-on-scroll, scroll depth milestones and
//! time on page
//!
//! All state here is scoped to one page load. Nothing is persisted, so a
//! reload starts every tracker from scratch.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use derive_more::Display;

/// Fraction of an element that must be visible before it is revealed
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Root margin of the reveal observer (50px of early-trigger slack at the bottom)
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Inline styles of an element waiting to be revealed
pub const HIDDEN_STYLES: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(20px)"),
    ("transition", "opacity 0.6s ease, transform 0.6s ease"),
];

/// Inline styles of a revealed element
pub const REVEALED_STYLES: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

/// Scroll depth milestones, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum ScrollMilestone {
    #[display("25%")]
    Quarter,
    #[display("50%")]
    Half,
    #[display("75%")]
    ThreeQuarters,
    #[display("100%")]
    Full,
}

impl ScrollMilestone {
    pub const ALL: [ScrollMilestone; 4] = [
        ScrollMilestone::Quarter,
        ScrollMilestone::Half,
        ScrollMilestone::ThreeQuarters,
        ScrollMilestone::Full,
    ];

    /// Scroll percentage at which the milestone is reached
    pub fn percent(&self) -> u32 {
        match self {
            ScrollMilestone::Quarter => 25,
            ScrollMilestone::Half => 50,
            ScrollMilestone::ThreeQuarters => 75,
            ScrollMilestone::Full => 100,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Scroll position as a whole percentage of the scrollable range.
///
/// Returns `None` when the page cannot scroll.
pub fn scroll_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Option<u32> {
    let range = scroll_height - viewport_height;
    if range.is_nan() || range <= 0.0 || !scroll_y.is_finite() {
        return None;
    }
    let percent = (scroll_y / range * 100.0).round().clamp(0.0, 100.0);
    Some(percent as u32)
}

/// Tracks the deepest scroll position and which milestones have been reported
#[derive(Debug, Clone, Default)]
pub struct ScrollDepthTracker {
    max_percent: u32,
    fired: [bool; 4],
}

impl ScrollDepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deepest percentage seen so far
    pub fn max_percent(&self) -> u32 {
        self.max_percent
    }

    /// Record a scroll position and return the milestones it newly reaches.
    ///
    /// Scrolling back up never re-arms a milestone. A jump past several
    /// milestones returns all of them in ascending order.
    pub fn observe(&mut self, percent: u32) -> Vec<ScrollMilestone> {
        if percent <= self.max_percent {
            return Vec::new();
        }
        self.max_percent = percent.min(100);

        let mut reached = Vec::new();
        for milestone in ScrollMilestone::ALL {
            if milestone.percent() <= self.max_percent && !self.fired[milestone.index()] {
                self.fired[milestone.index()] = true;
                reached.push(milestone);
            }
        }
        reached
    }

    pub fn has_fired(&self, milestone: ScrollMilestone) -> bool {
        self.fired[milestone.index()]
    }
}

/// Time from page load to unload, reported once
#[derive(Debug, Clone)]
pub struct TimeOnPage {
    started_at: DateTime<Utc>,
    reported: bool,
}

impl TimeOnPage {
    pub fn start_now() -> Self {
        Self::start_at(Utc::now())
    }

    pub fn start_at(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            reported: false,
        }
    }

    /// Whole seconds on the page at `now`, or `None` if already reported
    pub fn finish(&mut self, now: DateTime<Utc>) -> Option<i64> {
        if self.reported {
            return None;
        }
        self.reported = true;

        let millis = (now - self.started_at).num_milliseconds().max(0);
        Some((millis + 500) / 1000)
    }
}

/// Elements that have already been revealed
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: HashSet<u32>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle an intersection report for element `id`.
    ///
    /// Returns `true` exactly once per element: the first time it intersects.
    pub fn on_intersection(&mut self, id: u32, is_intersecting: bool) -> bool {
        is_intersecting && self.revealed.insert(id)
    }

    pub fn is_revealed(&self, id: u32) -> bool {
        self.revealed.contains(&id)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // ========================================================================
    // Scroll Percent Tests
    // ========================================================================

    #[test]
    fn test_scroll_percent_rounds() {
        assert_eq!(scroll_percent(0.0, 3000.0, 1000.0), Some(0));
        assert_eq!(scroll_percent(500.0, 3000.0, 1000.0), Some(25));
        assert_eq!(scroll_percent(999.0, 3000.0, 1000.0), Some(50));
        assert_eq!(scroll_percent(2000.0, 3000.0, 1000.0), Some(100));
    }

    #[test]
    fn test_scroll_percent_clamps_overscroll() {
        assert_eq!(scroll_percent(2100.0, 3000.0, 1000.0), Some(100));
        assert_eq!(scroll_percent(-40.0, 3000.0, 1000.0), Some(0));
    }

    #[test]
    fn test_unscrollable_page_has_no_percent() {
        assert_eq!(scroll_percent(0.0, 800.0, 800.0), None);
        assert_eq!(scroll_percent(0.0, 600.0, 800.0), None);
    }

    // ========================================================================
    // Milestone Tests
    // ========================================================================

    #[test]
    fn test_milestones_fire_once_in_order() {
        let mut tracker = ScrollDepthTracker::new();
        let mut fired = Vec::new();

        for percent in [10, 30, 20, 60] {
            fired.extend(tracker.observe(percent));
        }

        assert_eq!(fired, vec![ScrollMilestone::Quarter, ScrollMilestone::Half]);
        assert_eq!(tracker.max_percent(), 60);
    }

    #[test]
    fn test_regression_does_not_rearm() {
        let mut tracker = ScrollDepthTracker::new();
        assert_eq!(tracker.observe(30), vec![ScrollMilestone::Quarter]);
        assert!(tracker.observe(5).is_empty());
        assert!(tracker.observe(30).is_empty());
        assert!(tracker.observe(49).is_empty());
        assert!(tracker.has_fired(ScrollMilestone::Quarter));
        assert!(!tracker.has_fired(ScrollMilestone::Half));
    }

    #[test]
    fn test_jump_fires_every_crossed_milestone() {
        let mut tracker = ScrollDepthTracker::new();
        assert_eq!(tracker.observe(100), ScrollMilestone::ALL.to_vec());
        assert!(tracker.observe(100).is_empty());
    }

    #[test]
    fn test_milestone_labels() {
        let labels: Vec<String> = ScrollMilestone::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["25%", "50%", "75%", "100%"]);
    }

    // ========================================================================
    // Time On Page Tests
    // ========================================================================

    #[test]
    fn test_time_on_page_rounds_seconds() {
        let start = Utc::now();
        let mut timer = TimeOnPage::start_at(start);
        assert_eq!(timer.finish(start + Duration::milliseconds(12_600)), Some(13));
    }

    #[test]
    fn test_time_on_page_reported_once() {
        let start = Utc::now();
        let mut timer = TimeOnPage::start_at(start);
        assert_eq!(timer.finish(start + Duration::seconds(4)), Some(4));
        assert_eq!(timer.finish(start + Duration::seconds(9)), None);
    }

    #[test]
    fn test_clock_going_backwards_reports_zero() {
        let start = Utc::now();
        let mut timer = TimeOnPage::start_at(start);
        assert_eq!(timer.finish(start - Duration::seconds(3)), Some(0));
    }

    // ========================================================================
    // Reveal Tests
    // ========================================================================

    #[test]
    fn test_reveal_happens_once() {
        let mut tracker = RevealTracker::new();
        assert!(!tracker.on_intersection(1, false));
        assert!(tracker.on_intersection(1, true));
        assert!(!tracker.on_intersection(1, true));
        assert!(!tracker.on_intersection(1, false));
        assert!(tracker.is_revealed(1));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn test_elements_reveal_independently() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.on_intersection(1, true));
        assert!(tracker.on_intersection(2, true));
        assert!(!tracker.is_revealed(3));
    }
}

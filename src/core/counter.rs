//! Waitlist counter state, persistence and display binding

use std::ops::RangeInclusive;
use std::sync::Arc;

use super::storage::{COUNT_KEY, KeyValueStore};

/// How far below the target a count-up animation starts
pub const COUNT_UP_SPAN: u64 = 20;

/// Interval between count-up frames
pub const COUNT_UP_STEP_MS: u32 = 50;

/// Delay before the page-load count-up starts
pub const COUNT_UP_DELAY_MS: u32 = 1000;

/// Something that shows the waitlist count as text
pub trait CountDisplay: Send + Sync {
    fn show(&self, text: &str);
}

/// Format a count the way `en-US` locales do (`1,234,567`)
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}

/// Frames of a cosmetic count-up towards `target`
///
/// Yields every value from `max(0, target - COUNT_UP_SPAN)` up to and including
/// `target`, one step per frame.
#[derive(Debug, Clone)]
pub struct CountUp {
    frames: RangeInclusive<u64>,
}

impl CountUp {
    pub fn towards(target: u64) -> Self {
        Self {
            frames: target.saturating_sub(COUNT_UP_SPAN)..=target,
        }
    }
}

impl Iterator for CountUp {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.frames.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

/// Handle returned by [`CounterStore::bind`], used to detach the display again
pub type DisplayId = u64;

/// The waitlist count with its bound displays
pub struct CounterStore {
    count: u64,
    store: Arc<dyn KeyValueStore>,
    displays: Vec<(DisplayId, Box<dyn CountDisplay>)>,
    next_display: DisplayId,
}

impl CounterStore {
    /// Load the count, preferring a persisted value above `initial`
    pub fn load(initial: u64, store: Arc<dyn KeyValueStore>) -> Self {
        let persisted = match store.get_item(COUNT_KEY) {
            Ok(value) => value.and_then(|v| v.trim().parse::<u64>().ok()),
            Err(e) => {
                leptos::logging::log!("Could not read persisted count: {}", e);
                None
            }
        };

        Self {
            count: persisted.map_or(initial, |p| p.max(initial)),
            store,
            displays: Vec::new(),
            next_display: 0,
        }
    }

    /// Current count
    pub fn get(&self) -> u64 {
        self.count
    }

    /// Add one signup, persist it and re-render every display.
    ///
    /// Saturates at `u64::MAX`; the count never goes down.
    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.persist();
        self.render();
        self.count
    }

    /// Write the formatted count to every bound display
    pub fn render(&self) {
        let text = format_count(self.count);
        for (_, display) in &self.displays {
            display.show(&text);
        }
    }

    /// Attach a display and render the current count into it
    pub fn bind(&mut self, display: impl CountDisplay + 'static) -> DisplayId {
        display.show(&format_count(self.count));
        let id = self.next_display;
        self.next_display += 1;
        self.displays.push((id, Box::new(display)));
        id
    }

    /// Detach a display; it receives no further renders
    pub fn unbind(&mut self, id: DisplayId) -> bool {
        let before = self.displays.len();
        self.displays.retain(|(bound, _)| *bound != id);
        self.displays.len() != before
    }

    /// Number of bound displays
    pub fn display_count(&self) -> usize {
        self.displays.len()
    }

    /// Count-up frames ending at the current count
    pub fn count_up(&self) -> CountUp {
        CountUp::towards(self.count)
    }

    // Best-effort: the in-memory count stays authoritative for this page
    fn persist(&self) {
        if let Err(e) = self.store.set_item(COUNT_KEY, &self.count.to_string()) {
            leptos::logging::log!("Could not persist waitlist count: {}", e);
        }
    }
}

//! Waitlist count display with the page-load count-up animation

use leptos::prelude::*;

use crate::core::counter::COUNT_UP_DELAY_MS;
use crate::core::{CountDisplay, Generation, Ticket, format_count};
use crate::ui::use_waitlist_context;

/// Reactive text bound to the counter.
///
/// Every real render advances the animation generation, so a count-up that is
/// still running stops instead of overwriting the new value.
#[derive(Clone, Copy)]
pub struct CountDisplayHandle {
    text: RwSignal<String>,
    generation: StoredValue<Generation>,
}

impl CountDisplayHandle {
    pub fn new(text: RwSignal<String>) -> Self {
        Self {
            text,
            generation: StoredValue::new(Generation::new()),
        }
    }

    fn advance(&self) -> Ticket {
        self.generation.update_value(|g| {
            g.advance();
        });
        self.generation.with_value(|g| g.current())
    }

    /// Whether the count-up started with `ticket` may still draw frames
    pub fn is_animating(&self, ticket: Ticket) -> bool {
        self.generation.try_with_value(|g| g.is_current(ticket)) == Some(true)
    }

    /// Count up to `target` after `delay_ms`, restarting any running animation
    pub fn animate_to(&self, target: u64, delay_ms: u32) -> Ticket {
        let ticket = self.advance();

        #[cfg(not(feature = "ssr"))]
        {
            use crate::core::CountUp;
            use crate::core::counter::COUNT_UP_STEP_MS;
            use gloo_timers::future::TimeoutFuture;
            use leptos::task::spawn_local;

            let handle = *self;
            spawn_local(async move {
                TimeoutFuture::new(delay_ms).await;
                for frame in CountUp::towards(target) {
                    if !handle.is_animating(ticket) {
                        return;
                    }
                    handle.text.try_set(format_count(frame));
                    TimeoutFuture::new(COUNT_UP_STEP_MS).await;
                }
            });
        }

        // No timers while rendering on the server
        #[cfg(feature = "ssr")]
        let _ = (target, delay_ms);

        ticket
    }
}

impl CountDisplay for CountDisplayHandle {
    fn show(&self, text: &str) {
        self.advance();
        self.text.try_set(text.to_string());
    }
}

/// Waitlist count, formatted with thousands separators
#[component]
pub fn WaitlistCount(
    /// Element id of the display
    #[prop(into)]
    id: String,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let ctx = use_waitlist_context();

    // Both server and first client render show the configured count
    let text = RwSignal::new(format_count(ctx.initial_count()));
    let handle = CountDisplayHandle::new(text);

    Effect::new(move |_| {
        let display = ctx.bind_display(handle);
        on_cleanup(move || ctx.unbind_display(display));
        handle.animate_to(ctx.count(), COUNT_UP_DELAY_MS);
    });

    view! {
        <span id=id class=class>{move || text.get()}</span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_stops_running_count_up() {
        let owner = Owner::new();
        owner.set();

        let text = RwSignal::new(String::new());
        let handle = CountDisplayHandle::new(text);

        let ticket = handle.animate_to(247, COUNT_UP_DELAY_MS);
        assert!(handle.is_animating(ticket));

        handle.show("248");

        assert!(!handle.is_animating(ticket));
        assert_eq!(text.get_untracked(), "248");
    }

    #[test]
    fn test_restarted_count_up_replaces_previous_one() {
        let owner = Owner::new();
        owner.set();

        let handle = CountDisplayHandle::new(RwSignal::new(String::new()));

        let first = handle.animate_to(100, 0);
        let second = handle.animate_to(200, 0);

        assert!(!handle.is_animating(first));
        assert!(handle.is_animating(second));
    }
}

//! Page tracker component for scroll, reveal and lifecycle events
//!
//! Once the page is hydrated this component:
//! - reports `page_view`
//! - reveals `.reveal-on-scroll` elements as they enter the viewport
//! - reports scroll depth milestones and time on page
//! - reports uncaught script errors as `javascript_error`

use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

/// CSS class of elements revealed on scroll
pub const REVEAL_CLASS: &str = "reveal-on-scroll";

/// Set once the window listeners of this page load are attached
#[cfg_attr(feature = "ssr", allow(dead_code))]
static WINDOW_LISTENERS_ARMED: AtomicBool = AtomicBool::new(false);

/// Returns `true` for the first caller only
#[cfg_attr(feature = "ssr", allow(dead_code))]
fn claim_once(flag: &AtomicBool) -> bool {
    !flag.swap(true, Ordering::SeqCst)
}

/// Page tracker component
///
/// Place this once per page. It renders nothing visible.
#[component]
pub fn PageTracker() -> impl IntoView {
    #[cfg(not(feature = "ssr"))]
    {
        use crate::core::AnalyticsEvent;
        use crate::ui::browser::page_info;
        use crate::ui::use_waitlist_context;

        let ctx = use_waitlist_context();

        Effect::new(move |_| {
            if let Some((title, location)) = page_info() {
                ctx.track(AnalyticsEvent::page_view(title, location));
            }

            let Some(window) = web_sys::window() else {
                return;
            };

            // Remounts bring fresh elements to reveal
            listeners::arm_reveal_observer(&window);

            // Window listeners live for the whole page load
            if claim_once(&WINDOW_LISTENERS_ARMED) {
                listeners::track_scroll_depth(&window, ctx);
                listeners::track_time_on_page(&window, ctx);
                listeners::report_script_errors(&window, ctx);
            }
        });
    }

    view! {
        <div class="hidden" aria-hidden="true"></div>
    }
}

#[cfg(not(feature = "ssr"))]
mod listeners {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    use super::REVEAL_CLASS;
    use crate::core::scroll::{
        HIDDEN_STYLES, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD, REVEALED_STYLES,
    };
    use crate::core::{
        AnalyticsEvent, RevealTracker, ScrollDepthTracker, TimeOnPage, events, scroll_percent,
    };
    use crate::ui::WaitlistContext;

    const REVEAL_ID_ATTR: &str = "data-reveal-id";

    fn apply_styles(element: &web_sys::HtmlElement, styles: &[(&str, &str)]) {
        let style = element.style();
        for (property, value) in styles {
            let _ = style.set_property(property, value);
        }
    }

    /// Hide every reveal element and show each the first time it intersects
    pub fn arm_reveal_observer(window: &web_sys::Window) {
        let Some(document) = window.document() else {
            return;
        };
        let Ok(elements) = document.query_selector_all(&format!(".{}", REVEAL_CLASS)) else {
            return;
        };

        let mut revealed = RevealTracker::new();
        let on_intersect = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(id) = target
                        .get_attribute(REVEAL_ID_ATTR)
                        .and_then(|id| id.parse::<u32>().ok())
                    else {
                        continue;
                    };

                    if revealed.on_intersection(id, entry.is_intersecting()) {
                        if let Some(element) = target.dyn_ref::<web_sys::HtmlElement>() {
                            apply_styles(element, &REVEALED_STYLES);
                        }
                        observer.unobserve(&target);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>);

        let options = web_sys::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);

        let Ok(observer) = web_sys::IntersectionObserver::new_with_options(
            on_intersect.as_ref().unchecked_ref(),
            &options,
        ) else {
            leptos::logging::warn!("IntersectionObserver unavailable, reveal animations disabled");
            return;
        };

        for i in 0..elements.length() {
            let Some(element) = elements
                .item(i)
                .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                continue;
            };
            let _ = element.set_attribute(REVEAL_ID_ATTR, &i.to_string());
            apply_styles(&element, &HIDDEN_STYLES);
            observer.observe(&element);
        }

        // Leak the callback to keep it alive for the page lifetime
        on_intersect.forget();
    }

    /// Report 25/50/75/100% scroll depth, each once per page load
    pub fn track_scroll_depth(window: &web_sys::Window, ctx: WaitlistContext) {
        let mut tracker = ScrollDepthTracker::new();

        let on_scroll = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(body) = window.document().and_then(|d| d.body()) else {
                return;
            };
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            let viewport = window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);

            let Some(percent) = scroll_percent(scroll_y, body.scroll_height() as f64, viewport)
            else {
                return;
            };

            for milestone in tracker.observe(percent) {
                ctx.track(
                    AnalyticsEvent::new(events::SCROLL_DEPTH).param("depth", milestone.to_string()),
                );
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let _ = window
            .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        on_scroll.forget();
    }

    /// Report whole seconds on the page when it unloads
    pub fn track_time_on_page(window: &web_sys::Window, ctx: WaitlistContext) {
        let mut timer = TimeOnPage::start_now();

        let on_unload = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(seconds) = timer.finish(chrono::Utc::now()) {
                ctx.track(AnalyticsEvent::time_on_page(seconds));
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let _ = window
            .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref());
        on_unload.forget();
    }

    /// Report uncaught errors anywhere on the page
    pub fn report_script_errors(window: &web_sys::Window, ctx: WaitlistContext) {
        let on_error = Closure::wrap(Box::new(move |event: web_sys::ErrorEvent| {
            ctx.track(AnalyticsEvent::script_error(
                event.message(),
                event.filename(),
                event.lineno(),
            ));
        }) as Box<dyn FnMut(web_sys::ErrorEvent)>);

        let _ = window
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
        on_error.forget();
    }
}

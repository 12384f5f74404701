//! Call-to-action buttons and in-page anchor links

use leptos::prelude::*;

use crate::core::AnalyticsEvent;
use crate::ui::use_waitlist_context;

/// Scroll smoothly to `href` when it is an in-page anchor.
///
/// Returns `true` when the default navigation should be suppressed.
fn smooth_scroll(href: &str) -> bool {
    #[cfg(not(feature = "ssr"))]
    {
        crate::ui::browser::scroll_to_anchor(href)
    }

    #[cfg(feature = "ssr")]
    {
        let _ = href;
        false
    }
}

/// Button that reports `cta_click` and scrolls to its target section
#[component]
pub fn CtaButton(
    /// Visible button text
    #[prop(into)]
    label: String,
    /// Anchor of the section to scroll to, e.g. `#signup`
    #[prop(into)]
    href: String,
    /// Section the button sits in
    #[prop(optional, into)]
    section: Option<String>,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let ctx = use_waitlist_context();
    let text = label.clone();
    let target = href.clone();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ctx.track(AnalyticsEvent::cta_click(&text, section.as_deref()));
        if smooth_scroll(&target) {
            ev.prevent_default();
        }
    };

    view! {
        <a href=href class=format!("cta-button {}", class) on:click=on_click>
            {label}
        </a>
    }
}

/// Navigation link to a section on the same page
#[component]
pub fn AnchorLink(
    #[prop(into)] href: String,
    children: Children,
) -> impl IntoView {
    let target = href.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        if smooth_scroll(&target) {
            ev.prevent_default();
        }
    };

    view! {
        <a href=href on:click=on_click>{children()}</a>
    }
}

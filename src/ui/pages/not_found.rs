//! Not found page component

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Page not found" />
        <div class="not-found">
            <h1 class="not-found-code">"404"</h1>
            <p class="not-found-text">"The page you're looking for doesn't exist or has been moved."</p>
            <A href="/" attr:class="cta-button">"Go Home"</A>
        </div>
    }
}

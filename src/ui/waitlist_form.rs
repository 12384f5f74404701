//! Waitlist signup form
//!
//! Email input with inline validation, a submit button that is disabled while
//! a submission is in flight, and inline feedback or a success panel.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::{AnalyticsEvent, BackendPreference, FieldValidation, SubmitError};
use crate::ui::debounce::Debounce;
use crate::ui::feedback::{FeedbackHandle, FeedbackMessage, SuccessPanel};
use crate::ui::use_waitlist_context;

/// Pause after the last keystroke before an invalid field is checked again
const REVALIDATE_DELAY_MS: u32 = 300;

#[component]
pub fn WaitlistForm(
    /// DOM id of the form, reported with signup attempts
    #[prop(into)]
    form_id: String,
    /// Section the form sits in, reported with signup attempts
    #[prop(into)]
    location: String,
    /// Replace the form with the success panel after signing up
    #[prop(default = false)]
    success_panel: bool,
) -> impl IntoView {
    let ctx = use_waitlist_context();
    let config = ctx.config();

    let email = RwSignal::new(String::new());
    let validation = RwSignal::new(FieldValidation::Untouched);
    let submitting = RwSignal::new(false);
    let feedback = FeedbackHandle::new(success_panel);
    let revalidate = Debounce::new(REVALIDATE_DELAY_MS);

    // Hidden timestamp field, filled in once the page is live
    let timestamp = RwSignal::new(String::new());
    Effect::new(move |_| {
        timestamp.set(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true));
    });

    let attempt_form_id = form_id.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        ctx.track(AnalyticsEvent::signup_attempt(
            Some(attempt_form_id.as_str()),
            Some(location.as_str()),
        ));

        let value = email.get_untracked();
        let state = FieldValidation::check(&value);
        if state.is_invalid() {
            validation.set(state);
            return;
        }

        submitting.set(true);
        let pipeline = ctx.pipeline();
        spawn_local(async move {
            match pipeline.submit(&value, BackendPreference::Auto).await {
                Ok(_) => {
                    email.set(String::new());
                    validation.set(FieldValidation::Untouched);
                    feedback.show_success();
                }
                Err(SubmitError::Validation(e)) => validation.set(FieldValidation::Invalid(e)),
                Err(e) => feedback.show_error(e.to_string()),
            }
            submitting.set(false);
        });
    };

    let on_input = move |ev| {
        email.set(event_target_value(&ev));
        if validation.get_untracked().is_invalid() {
            revalidate.call(move || {
                validation.try_set(FieldValidation::check(&email.get_untracked()));
            });
        }
    };

    let on_blur = move |_| {
        validation.set(FieldValidation::on_blur(&email.get_untracked()));
    };

    let input_id = format!("{}-email", form_id);

    view! {
        <form
            id=form_id
            name=config.relay_form_name.clone()
            class="waitlist-form"
            class:hidden=move || feedback.panel_shown()
            novalidate=true
            on:submit=on_submit
        >
            <input type="hidden" name="form-name" value=config.relay_form_name.clone() />
            <input type="hidden" name="page" value=config.page_tag.clone() />
            <input type="hidden" name="timestamp" prop:value=move || timestamp.get() />

            <div class="waitlist-form-row">
                <label for=input_id.clone() class="sr-only">"Email address"</label>
                <input
                    type="email"
                    id=input_id
                    name="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    class="waitlist-email"
                    class:invalid=move || validation.with(|v| v.is_invalid())
                    aria-invalid=move || if validation.with(|v| v.is_invalid()) { "true" } else { "false" }
                    prop:value=move || email.get()
                    on:input=on_input
                    on:blur=on_blur
                />
                <button
                    type="submit"
                    class="cta-button"
                    prop:disabled=move || submitting.get()
                >
                    {move || if submitting.get() { "Joining..." } else { "Join the Waitlist" }}
                </button>
            </div>

            {move || validation.with(|v| v.message()).map(|message| view! {
                <p class="field-error">{message}</p>
            })}

            <FeedbackMessage feedback=feedback />
        </form>
        <SuccessPanel feedback=feedback />
    }
}

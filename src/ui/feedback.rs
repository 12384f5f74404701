//! Inline form feedback and the success panel
//!
//! Each form owns one [`FeedbackSlot`]; showing a message replaces the
//! previous one and schedules its own expiry.

use leptos::prelude::*;

use crate::core::{FeedbackKind, FeedbackSlot, FeedbackTicket};

/// Feedback target bound to one form
#[derive(Clone, Copy)]
pub struct FeedbackHandle {
    slot: RwSignal<FeedbackSlot>,
    has_panel: bool,
}

impl FeedbackHandle {
    pub fn new(has_panel: bool) -> Self {
        Self {
            slot: RwSignal::new(FeedbackSlot::new()),
            has_panel,
        }
    }

    pub fn slot(&self) -> RwSignal<FeedbackSlot> {
        self.slot
    }

    pub fn show_error(&self, message: impl Into<String>) {
        let message = message.into();
        let ticket = self.slot.try_update(|s| s.show_error(message)).flatten();
        self.schedule_expiry(ticket);
    }

    pub fn show_success(&self) {
        let has_panel = self.has_panel;
        let ticket = self.slot.try_update(|s| s.show_success(has_panel)).flatten();
        self.schedule_expiry(ticket);
    }

    pub fn panel_shown(&self) -> bool {
        self.slot.with(|s| s.is_panel_shown())
    }

    fn schedule_expiry(&self, ticket: Option<FeedbackTicket>) {
        let Some(ticket) = ticket else {
            return;
        };

        #[cfg(not(feature = "ssr"))]
        {
            use crate::core::feedback::FEEDBACK_TIMEOUT_MS;
            use gloo_timers::future::TimeoutFuture;
            use leptos::task::spawn_local;

            let slot = self.slot;
            spawn_local(async move {
                TimeoutFuture::new(FEEDBACK_TIMEOUT_MS).await;
                slot.try_update(|s| s.expire(ticket));
            });
        }

        // Server rendering never shows feedback
        #[cfg(feature = "ssr")]
        let _ = ticket;
    }
}

/// Inline success/error message for a form
#[component]
pub fn FeedbackMessage(feedback: FeedbackHandle) -> impl IntoView {
    let slot = feedback.slot();
    let inline = move || {
        slot.with(|s| {
            s.current()
                .filter(|f| f.kind != FeedbackKind::SuccessPanel)
                .cloned()
        })
    };

    view! {
        {move || inline().map(|f| {
            let class = match f.kind {
                FeedbackKind::Error => "form-feedback error-message",
                _ => "form-feedback success-message",
            };
            view! {
                <div class=class role="status" aria-live="polite">{f.message}</div>
            }
        })}
    }
}

/// Dedicated success panel, shown in place of the form
#[component]
pub fn SuccessPanel(feedback: FeedbackHandle) -> impl IntoView {
    view! {
        <Show when=move || feedback.panel_shown()>
            <div class="success-panel" role="status">
                <h3>"You're on the list!"</h3>
                <p>"Thanks for joining. We'll email you as soon as we launch."</p>
            </div>
        </Show>
    }
}

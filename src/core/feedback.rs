//! Per-form feedback state
//!
//! A [`FeedbackSlot`] holds at most one feedback message. Showing a new one
//! replaces the old one, and each expiring message gets a ticket so a timer
//! started for a superseded message cannot clear its replacement.

use super::generation::{Generation, Ticket};

/// How long error and inline success messages stay visible
pub const FEEDBACK_TIMEOUT_MS: u32 = 5000;

/// Default inline success text
pub const SUCCESS_MESSAGE: &str = "You're on the list! We'll be in touch soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Inline success message next to the form
    Success,
    /// Inline error message next to the form
    Error,
    /// Dedicated success panel replacing the form
    SuccessPanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    /// Whether this feedback clears itself after [`FEEDBACK_TIMEOUT_MS`]
    pub fn expires(&self) -> bool {
        !matches!(self.kind, FeedbackKind::SuccessPanel)
    }
}

/// Ticket identifying one shown feedback message
pub type FeedbackTicket = Ticket;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSlot {
    current: Option<Feedback>,
    generation: Generation,
}

impl FeedbackSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current feedback.
    ///
    /// Returns a ticket to pass to [`FeedbackSlot::expire`] when the feedback
    /// should time out, or `None` if it stays until replaced.
    pub fn show(&mut self, feedback: Feedback) -> Option<FeedbackTicket> {
        let ticket = self.generation.advance();
        let expires = feedback.expires();
        self.current = Some(feedback);
        expires.then_some(ticket)
    }

    pub fn show_error(&mut self, message: impl Into<String>) -> Option<FeedbackTicket> {
        self.show(Feedback {
            kind: FeedbackKind::Error,
            message: message.into(),
        })
    }

    /// Show success, using the success panel when the target has one
    pub fn show_success(&mut self, has_panel: bool) -> Option<FeedbackTicket> {
        let kind = if has_panel {
            FeedbackKind::SuccessPanel
        } else {
            FeedbackKind::Success
        };
        self.show(Feedback {
            kind,
            message: SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Clear the feedback identified by `ticket` if it is still shown
    pub fn expire(&mut self, ticket: FeedbackTicket) -> bool {
        if self.generation.is_current(ticket) && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.generation.advance();
        self.current = None;
    }

    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    /// Number of feedback nodes to render (never more than one)
    pub fn node_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    pub fn is_panel_shown(&self) -> bool {
        matches!(
            self.current,
            Some(Feedback {
                kind: FeedbackKind::SuccessPanel,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_replace_each_other() {
        let mut slot = FeedbackSlot::new();
        slot.show_error("first");
        slot.show_error("second");

        assert_eq!(slot.node_count(), 1);
        assert_eq!(slot.current().unwrap().message, "second");
    }

    #[test]
    fn test_expire_clears_current() {
        let mut slot = FeedbackSlot::new();
        let ticket = slot.show_error("oops").unwrap();

        assert!(slot.expire(ticket));
        assert_eq!(slot.node_count(), 0);
        assert!(!slot.expire(ticket));
    }

    #[test]
    fn test_superseded_timer_does_not_clear_replacement() {
        let mut slot = FeedbackSlot::new();
        let old = slot.show_error("first").unwrap();
        let new = slot.show_error("second").unwrap();

        assert!(!slot.expire(old));
        assert_eq!(slot.current().unwrap().message, "second");
        assert!(slot.expire(new));
    }

    #[test]
    fn test_inline_success_expires() {
        let mut slot = FeedbackSlot::new();
        let ticket = slot.show_success(false);

        assert!(ticket.is_some());
        assert_eq!(slot.current().unwrap().kind, FeedbackKind::Success);
        assert!(!slot.is_panel_shown());
    }

    #[test]
    fn test_success_panel_does_not_expire() {
        let mut slot = FeedbackSlot::new();
        let error_ticket = slot.show_error("oops").unwrap();

        assert_eq!(slot.show_success(true), None);
        assert!(slot.is_panel_shown());
        assert!(!slot.expire(error_ticket));
        assert!(slot.is_panel_shown());
    }

    #[test]
    fn test_clear_invalidates_tickets() {
        let mut slot = FeedbackSlot::new();
        let ticket = slot.show_error("oops").unwrap();
        slot.clear();
        slot.show(Feedback {
            kind: FeedbackKind::Success,
            message: "ok".into(),
        });

        assert!(!slot.expire(ticket));
        assert_eq!(slot.node_count(), 1);
    }
}

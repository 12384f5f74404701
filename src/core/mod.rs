//! Platform-independent waitlist logic: counter, submission pipeline,
//! feedback, analytics and scroll tracking

pub mod analytics;
pub mod backend;
pub mod config;
pub mod counter;
pub mod feedback;
pub mod generation;
pub mod pipeline;
pub mod scroll;
pub mod storage;
pub mod validation;
#[cfg(test)]
mod tests;

pub use analytics::{Analytics, AnalyticsEvent, AnalyticsSink, LogSink, events};
pub use backend::{
    BackendKind, EndpointBackend, HttpRequest, HttpTransport, LocalBackend, RelayBackend, Signup,
    SubmissionBackend, SubmitError, TransportError,
};
pub use config::LandingConfig;
pub use counter::{CountDisplay, CountUp, CounterStore, DisplayId, format_count};
pub use feedback::{Feedback, FeedbackKind, FeedbackSlot, FeedbackTicket};
pub use generation::{Generation, Ticket};
pub use pipeline::{BackendPreference, Receipt, SubmissionPipeline};
pub use scroll::{RevealTracker, ScrollDepthTracker, ScrollMilestone, TimeOnPage, scroll_percent};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use validation::{FieldValidation, ValidationError, validate_email};

//! Waitlist form submission pipeline
//!
//! Validates the email, hands it to the first available backend, and applies
//! the side effects of the outcome (counter increment, analytics).

use std::sync::{Arc, Mutex};

use super::analytics::{Analytics, AnalyticsEvent, events};
use super::backend::{
    BackendKind, EndpointBackend, HttpTransport, LocalBackend, RelayBackend, Signup,
    SubmissionBackend, SubmitError,
};
use super::config::LandingConfig;
use super::counter::CounterStore;
use super::storage::KeyValueStore;
use super::validation::validate_email;

/// Which backend a submission may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// First available backend in priority order
    #[default]
    Auto,
    /// Only this backend; fails if it is not available
    Only(BackendKind),
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub backend: BackendKind,
    pub signup: Signup,
    /// Waitlist count after this signup
    pub count: u64,
}

/// Ordered backends plus the state a signup touches
pub struct SubmissionPipeline {
    backends: Vec<Box<dyn SubmissionBackend>>,
    counter: Arc<Mutex<CounterStore>>,
    analytics: Analytics,
    source: String,
}

impl SubmissionPipeline {
    /// Pipeline without backends
    pub fn new(
        counter: Arc<Mutex<CounterStore>>,
        analytics: Analytics,
        source: impl Into<String>,
    ) -> Self {
        Self {
            backends: Vec::new(),
            counter,
            analytics,
            source: source.into(),
        }
    }

    /// Standard chain: relay, custom endpoint, local fallback
    pub fn from_config(
        config: &LandingConfig,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn KeyValueStore>,
        counter: Arc<Mutex<CounterStore>>,
        analytics: Analytics,
    ) -> Self {
        Self::new(counter, analytics, config.source_tag.clone())
            .with_backend(RelayBackend::new(
                config.relay_enabled,
                config.relay_form_name.clone(),
                config.page_tag.clone(),
                transport.clone(),
            ))
            .with_backend(EndpointBackend::new(
                config.configured_endpoint().map(str::to_string),
                transport,
            ))
            .with_backend(LocalBackend::new(store))
    }

    /// Append a backend at the lowest priority
    pub fn with_backend(mut self, backend: impl SubmissionBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    pub fn counter(&self) -> &Arc<Mutex<CounterStore>> {
        &self.counter
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// The backend a submission with this preference would use
    pub fn select(&self, preference: BackendPreference) -> Option<&dyn SubmissionBackend> {
        self.backends
            .iter()
            .map(|b| b.as_ref())
            .filter(|b| b.is_available())
            .find(|b| match preference {
                BackendPreference::Auto => true,
                BackendPreference::Only(kind) => b.kind() == kind,
            })
    }

    /// Submit an email to the waitlist.
    ///
    /// Invalid emails are rejected before any backend is contacted and emit no
    /// analytics. Backend failures never panic; they come back as `Err` and are
    /// reported as `signup_error`.
    pub async fn submit(
        &self,
        email: &str,
        preference: BackendPreference,
    ) -> Result<Receipt, SubmitError> {
        let email = validate_email(email)?;

        let Some(backend) = self.select(preference) else {
            leptos::logging::warn!("No backend available for {:?}", preference);
            self.report_failure(None, &SubmitError::NoBackend);
            return Err(SubmitError::NoBackend);
        };

        let kind = backend.kind();
        let signup = Signup::new(email, self.source.clone());
        leptos::logging::log!("Submitting signup via {}", kind);

        if let Err(e) = backend.submit(&signup).await {
            leptos::logging::warn!("Signup via {} failed: {}", kind, e);
            self.report_failure(Some(kind), &e);
            return Err(e);
        }

        let count = match self.counter.lock() {
            Ok(mut counter) => counter.increment(),
            Err(poisoned) => poisoned.into_inner().increment(),
        };

        self.analytics.emit(
            AnalyticsEvent::new(events::SIGNUP)
                .param("backend", kind.to_string())
                .param("source", self.source.clone()),
        );

        Ok(Receipt {
            backend: kind,
            signup,
            count,
        })
    }

    fn report_failure(&self, backend: Option<BackendKind>, error: &SubmitError) {
        self.analytics.emit(
            AnalyticsEvent::new(events::SIGNUP_ERROR)
                .param("backend", backend.map_or("none".to_string(), |k| k.to_string()))
                .param("reason", error.reason())
                .param("message", error.to_string()),
        );
    }
}

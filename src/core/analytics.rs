//! Analytics event emission
//!
//! Events are fanned out to every registered [`AnalyticsSink`]. Sinks are
//! fire-and-forget: they never report back, and a sink whose backing SDK is
//! missing simply does nothing.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

/// Event names emitted by the landing page
pub mod events {
    pub const PAGE_VIEW: &str = "page_view";
    pub const SCROLL_DEPTH: &str = "scroll_depth";
    pub const TIME_ON_PAGE: &str = "time_on_page";
    pub const CTA_CLICK: &str = "cta_click";
    pub const SIGNUP_ATTEMPT: &str = "email_signup_attempt";
    pub const SIGNUP: &str = "signup";
    pub const SIGNUP_ERROR: &str = "signup_error";
    pub const SCRIPT_ERROR: &str = "javascript_error";
}

/// A named analytics event with its parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub params: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Map::new(),
        }
    }

    /// Add a parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn page_view(title: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(events::PAGE_VIEW)
            .param("page_title", title.into())
            .param("page_location", location.into())
    }

    pub fn time_on_page(seconds: i64) -> Self {
        Self::new(events::TIME_ON_PAGE).param("seconds", seconds)
    }

    pub fn cta_click(button_text: &str, location: Option<&str>) -> Self {
        Self::new(events::CTA_CLICK)
            .param("button_text", button_text.trim())
            .param("button_location", location.unwrap_or("unknown"))
    }

    pub fn signup_attempt(form_id: Option<&str>, location: Option<&str>) -> Self {
        Self::new(events::SIGNUP_ATTEMPT)
            .param("form_id", form_id.unwrap_or("unknown"))
            .param("form_location", location.unwrap_or("unknown"))
    }

    pub fn script_error(
        message: impl Into<String>,
        filename: impl Into<String>,
        lineno: u32,
    ) -> Self {
        Self::new(events::SCRIPT_ERROR)
            .param("message", message.into())
            .param("filename", filename.into())
            .param("lineno", lineno)
    }
}

/// Destination for analytics events
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}

/// Diagnostic sink writing every event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn track(&self, event: &AnalyticsEvent) {
        leptos::logging::log!(
            "Event tracked: {} {}",
            event.name,
            Value::Object(event.params.clone())
        );
    }
}

/// Fan-out over zero or more sinks
#[derive(Clone, Default)]
pub struct Analytics {
    sinks: Vec<Arc<dyn AnalyticsSink>>,
}

impl Analytics {
    /// Emitter without sinks; every emit is a no-op
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink
    pub fn with_sink(mut self, sink: impl AnalyticsSink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Send an event to every sink
    pub fn emit(&self, event: AnalyticsEvent) {
        for sink in &self.sinks {
            sink.track(&event);
        }
    }
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emit_without_sinks_is_noop() {
        let analytics = Analytics::new();
        assert_eq!(analytics.sink_count(), 0);
        analytics.emit(AnalyticsEvent::new("anything").param("x", 1));
    }

    #[test]
    fn test_emit_reaches_every_sink() {
        let first = RecordingSink::default();
        let second = RecordingSink::default();
        let analytics = Analytics::new()
            .with_sink(first.clone())
            .with_sink(second.clone())
            .with_sink(LogSink);

        analytics.emit(AnalyticsEvent::new(events::SIGNUP).param("backend", "local"));

        assert_eq!(first.names(), vec!["signup"]);
        assert_eq!(second.names(), vec!["signup"]);
        assert_eq!(first.events()[0].get("backend"), Some(&json!("local")));
    }

    #[test]
    fn test_cta_click_defaults_location() {
        let event = AnalyticsEvent::cta_click("  Join the waitlist ", None);
        assert_eq!(event.get("button_text"), Some(&json!("Join the waitlist")));
        assert_eq!(event.get("button_location"), Some(&json!("unknown")));
    }

    #[test]
    fn test_signup_attempt_params() {
        let event = AnalyticsEvent::signup_attempt(Some("hero-form"), Some("hero"));
        assert_eq!(event.name, events::SIGNUP_ATTEMPT);
        assert_eq!(event.get("form_id"), Some(&json!("hero-form")));
        assert_eq!(event.get("form_location"), Some(&json!("hero")));
    }

    #[test]
    fn test_script_error_params() {
        let event = AnalyticsEvent::script_error("boom", "app.js", 12);
        assert_eq!(event.get("lineno"), Some(&json!(12)));
        assert_eq!(event.get("filename"), Some(&json!("app.js")));
    }
}

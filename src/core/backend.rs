//! Signup submission backends
//!
//! Three backends are provided, in the order the pipeline tries them:
//! - [`RelayBackend`]: same-origin form relay, URL-encoded POST
//! - [`EndpointBackend`]: operator-configured JSON endpoint
//! - [`LocalBackend`]: client-side store for demos and testing
//!
//! Network backends talk through an [`HttpTransport`] so the browser fetch
//! implementation can be swapped out in tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::storage::{KeyValueStore, StorageError, SUBMITTED_EMAILS_KEY};
use super::validation::ValidationError;

/// Content type of relay submissions
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type of endpoint submissions
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Submission failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Transport(#[from] TransportError),
    #[error("This email is already on the waitlist")]
    DuplicateEmail,
    #[error("No signup backend is available")]
    NoBackend,
}

impl SubmitError {
    /// Short machine-readable reason for analytics
    pub fn reason(&self) -> &'static str {
        match self {
            SubmitError::Validation(_) => "validation",
            SubmitError::Transport(_) => "transport",
            SubmitError::DuplicateEmail => "duplicate_email",
            SubmitError::NoBackend => "no_backend",
        }
    }
}

/// Network or storage failure while talking to a backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Could not encode request: {0}")]
    Encode(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Identifies a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[display("relay")]
    Relay,
    #[display("endpoint")]
    Endpoint,
    #[display("local")]
    Local,
}

/// One waitlist signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl Signup {
    pub fn new(email: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            timestamp: Utc::now(),
            source: source.into(),
        }
    }

    /// ISO-8601 timestamp with millisecond precision
    pub fn timestamp_iso(&self) -> String {
        self.timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

/// Outgoing HTTP POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Sends a POST and reports the response status
#[async_trait(?Send)]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, request: HttpRequest) -> Result<u16, TransportError>;
}

/// A place signups can be sent to
#[async_trait(?Send)]
pub trait SubmissionBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Whether the backend is configured and may be used
    fn is_available(&self) -> bool;

    async fn submit(&self, signup: &Signup) -> Result<(), SubmitError>;
}

/// POST through the transport and map non-2xx statuses to errors
async fn post_checked(
    transport: &dyn HttpTransport,
    request: HttpRequest,
) -> Result<(), SubmitError> {
    let status = transport.post(request).await?;
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(TransportError::Status(status).into())
    }
}

/// Same-origin form relay
pub struct RelayBackend {
    enabled: bool,
    form_name: String,
    page_tag: String,
    action: String,
    transport: Arc<dyn HttpTransport>,
}

impl RelayBackend {
    pub fn new(
        enabled: bool,
        form_name: impl Into<String>,
        page_tag: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            enabled,
            form_name: form_name.into(),
            page_tag: page_tag.into(),
            action: "/".to_string(),
            transport,
        }
    }

    /// URL-encoded relay body
    pub fn encode(&self, signup: &Signup) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("form-name", &self.form_name)
            .append_pair("email", &signup.email)
            .append_pair("page", &self.page_tag)
            .append_pair("timestamp", &signup.timestamp_iso())
            .finish()
    }
}

#[async_trait(?Send)]
impl SubmissionBackend for RelayBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Relay
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    async fn submit(&self, signup: &Signup) -> Result<(), SubmitError> {
        let request = HttpRequest {
            url: self.action.clone(),
            content_type: FORM_CONTENT_TYPE,
            body: self.encode(signup),
        };
        post_checked(self.transport.as_ref(), request).await
    }
}

/// Custom JSON endpoint
pub struct EndpointBackend {
    url: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

#[derive(Serialize)]
struct EndpointPayload<'a> {
    email: &'a str,
    source: &'a str,
    timestamp: String,
}

impl EndpointBackend {
    /// `url` should already exclude placeholders (see `LandingConfig::configured_endpoint`)
    pub fn new(url: Option<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { url, transport }
    }
}

#[async_trait(?Send)]
impl SubmissionBackend for EndpointBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Endpoint
    }

    fn is_available(&self) -> bool {
        self.url.is_some()
    }

    async fn submit(&self, signup: &Signup) -> Result<(), SubmitError> {
        let url = self.url.clone().ok_or(SubmitError::NoBackend)?;
        let body = serde_json::to_string(&EndpointPayload {
            email: &signup.email,
            source: &signup.source,
            timestamp: signup.timestamp_iso(),
        })
        .map_err(|e| TransportError::Encode(e.to_string()))?;

        let request = HttpRequest {
            url,
            content_type: JSON_CONTENT_TYPE,
            body,
        };
        post_checked(self.transport.as_ref(), request).await
    }
}

/// Client-side signup store used when no real backend is configured
pub struct LocalBackend {
    store: Arc<dyn KeyValueStore>,
}

impl LocalBackend {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Signups recorded so far
    pub fn records(&self) -> Result<Vec<Signup>, StorageError> {
        let Some(json) = self.store.get_item(SUBMITTED_EMAILS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&json).map_err(|e| StorageError::Corrupt {
            key: SUBMITTED_EMAILS_KEY.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl SubmissionBackend for LocalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn submit(&self, signup: &Signup) -> Result<(), SubmitError> {
        let mut records = self.records().map_err(TransportError::from)?;

        if records
            .iter()
            .any(|r| r.email.eq_ignore_ascii_case(&signup.email))
        {
            return Err(SubmitError::DuplicateEmail);
        }

        records.push(signup.clone());
        let json =
            serde_json::to_string(&records).map_err(|e| TransportError::Encode(e.to_string()))?;
        self.store
            .set_item(SUBMITTED_EMAILS_KEY, &json)
            .map_err(TransportError::from)?;

        leptos::logging::log!("Recorded signup locally ({} total)", records.len());
        Ok(())
    }
}

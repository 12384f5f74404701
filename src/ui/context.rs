//! Waitlist context shared by every component on the page
//!
//! Holds the configuration and the submission pipeline (which owns the
//! counter and the analytics emitter). In the browser the pipeline talks to
//! `localStorage` and `fetch`; during server rendering it is backed by memory
//! and never submits anything.

use std::sync::Arc;

use leptos::prelude::*;

use crate::core::{
    Analytics, AnalyticsEvent, CountDisplay, DisplayId, HttpTransport, KeyValueStore,
    LandingConfig, SubmissionPipeline,
};

#[derive(Clone, Copy)]
pub struct WaitlistContext {
    config: StoredValue<LandingConfig>,
    pipeline: StoredValue<Arc<SubmissionPipeline>>,
}

impl WaitlistContext {
    pub fn config(&self) -> LandingConfig {
        self.config.get_value()
    }

    pub fn pipeline(&self) -> Arc<SubmissionPipeline> {
        self.pipeline.get_value()
    }

    /// Count rendered on the server, before the browser state is loaded
    pub fn initial_count(&self) -> u64 {
        self.config.with_value(|c| c.initial_waitlist_count)
    }

    /// Current waitlist count
    pub fn count(&self) -> u64 {
        self.pipeline.with_value(|p| match p.counter().lock() {
            Ok(counter) => counter.get(),
            Err(poisoned) => poisoned.into_inner().get(),
        })
    }

    /// Attach a count display to the counter
    pub fn bind_display(&self, display: impl CountDisplay + 'static) -> DisplayId {
        self.pipeline.with_value(|p| match p.counter().lock() {
            Ok(mut counter) => counter.bind(display),
            Err(poisoned) => poisoned.into_inner().bind(display),
        })
    }

    /// Detach a count display bound with [`WaitlistContext::bind_display`]
    pub fn unbind_display(&self, id: DisplayId) {
        self.pipeline.try_with_value(|p| match p.counter().lock() {
            Ok(mut counter) => counter.unbind(id),
            Err(poisoned) => poisoned.into_inner().unbind(id),
        });
    }

    /// Emit an analytics event
    pub fn track(&self, event: AnalyticsEvent) {
        self.pipeline.with_value(|p| p.analytics().emit(event));
    }
}

#[cfg(not(feature = "ssr"))]
fn platform() -> (Arc<dyn KeyValueStore>, Arc<dyn HttpTransport>, Analytics) {
    use crate::ui::browser::{BrowserStore, FetchTransport, browser_analytics};

    (
        Arc::new(BrowserStore),
        Arc::new(FetchTransport),
        browser_analytics(),
    )
}

#[cfg(feature = "ssr")]
fn platform() -> (Arc<dyn KeyValueStore>, Arc<dyn HttpTransport>, Analytics) {
    use crate::core::MemoryStore;

    (
        Arc::new(MemoryStore::new()),
        Arc::new(server::NoNetwork),
        Analytics::new(),
    )
}

#[cfg(feature = "ssr")]
mod server {
    use async_trait::async_trait;

    use crate::core::{HttpRequest, HttpTransport, TransportError};

    /// Server rendering never submits signups
    pub struct NoNetwork;

    #[async_trait(?Send)]
    impl HttpTransport for NoNetwork {
        async fn post(&self, _request: HttpRequest) -> Result<u16, TransportError> {
            Err(TransportError::Network(
                "not available during server rendering".to_string(),
            ))
        }
    }
}

/// Provide the waitlist context to the application
pub fn provide_waitlist_context(config: LandingConfig) -> WaitlistContext {
    let (store, transport, analytics) = platform();

    let counter = crate::core::CounterStore::load(config.initial_waitlist_count, store.clone());
    let pipeline = SubmissionPipeline::from_config(
        &config,
        transport,
        store,
        Arc::new(std::sync::Mutex::new(counter)),
        analytics,
    );

    let ctx = WaitlistContext {
        config: StoredValue::new(config),
        pipeline: StoredValue::new(Arc::new(pipeline)),
    };

    provide_context(ctx);

    ctx
}

/// Use waitlist context from anywhere in the component tree
pub fn use_waitlist_context() -> WaitlistContext {
    use_context::<WaitlistContext>().expect("WaitlistContext should be provided")
}

//! Browser bindings for the platform-independent waitlist logic
//!
//! Provides:
//! - `localStorage`-backed [`BrowserStore`]
//! - fetch-based [`FetchTransport`] for the network backends
//! - analytics sinks for the global `gtag`, `fbq` and `customAnalytics` SDKs
//! - small DOM helpers (page info, smooth scrolling, embedded config)

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use crate::core::config::CONFIG_META_NAME;
use crate::core::{
    Analytics, AnalyticsEvent, AnalyticsSink, HttpRequest, HttpTransport, KeyValueStore,
    LandingConfig, LogSink, StorageError, TransportError,
};

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

/// `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write {
                key: key.to_string(),
            })
    }
}

/// HTTP POST via `fetch`
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn post(&self, request: HttpRequest) -> Result<u16, TransportError> {
        let response = gloo_net::http::Request::post(&request.url)
            .header("Content-Type", request.content_type)
            .body(request.body)
            .map_err(|e| TransportError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(response.status())
    }
}

/// Event parameters as a plain JS object
fn params_to_js(event: &AnalyticsEvent) -> JsValue {
    event
        .params
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::UNDEFINED)
}

/// Look up a global function by name, if the page defines one
fn global_function(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

/// Google Analytics: `gtag('event', name, params)`
#[derive(Debug, Default, Clone, Copy)]
pub struct GtagSink;

impl AnalyticsSink for GtagSink {
    fn track(&self, event: &AnalyticsEvent) {
        if let Some(gtag) = global_function(&js_sys::global(), "gtag") {
            let _ = gtag.call3(
                &JsValue::NULL,
                &JsValue::from_str("event"),
                &JsValue::from_str(&event.name),
                &params_to_js(event),
            );
        }
    }
}

/// Facebook Pixel: `fbq('track', name, params)`
#[derive(Debug, Default, Clone, Copy)]
pub struct PixelSink;

impl AnalyticsSink for PixelSink {
    fn track(&self, event: &AnalyticsEvent) {
        if let Some(fbq) = global_function(&js_sys::global(), "fbq") {
            let _ = fbq.call3(
                &JsValue::NULL,
                &JsValue::from_str("track"),
                &JsValue::from_str(&event.name),
                &params_to_js(event),
            );
        }
    }
}

/// Site-specific tracker: `window.customAnalytics.track(name, params)`
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomSink;

impl AnalyticsSink for CustomSink {
    fn track(&self, event: &AnalyticsEvent) {
        let Ok(tracker) = js_sys::Reflect::get(&js_sys::global(), &"customAnalytics".into()) else {
            return;
        };
        if tracker.is_undefined() || tracker.is_null() {
            return;
        }
        if let Some(track) = global_function(&tracker, "track") {
            let _ = track.call2(
                &tracker,
                &JsValue::from_str(&event.name),
                &params_to_js(event),
            );
        }
    }
}

/// Emitter wired to every sink the browser may provide
pub fn browser_analytics() -> Analytics {
    Analytics::new()
        .with_sink(GtagSink)
        .with_sink(PixelSink)
        .with_sink(LogSink)
        .with_sink(CustomSink)
}

/// Document title and URL for `page_view`
pub fn page_info() -> Option<(String, String)> {
    let window = web_sys::window()?;
    let title = window.document()?.title();
    let location = window.location().href().ok()?;
    Some((title, location))
}

/// Smoothly scroll to the element an in-page `#anchor` points at.
///
/// Returns `false` if there is no such element.
pub fn scroll_to_anchor(href: &str) -> bool {
    let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
        return false;
    };
    let Some(target) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return false;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

/// Configuration the server embedded in the page
pub fn read_embedded_config() -> LandingConfig {
    let selector = format!("meta[name=\"{}\"]", CONFIG_META_NAME);
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(&selector).ok().flatten())
        .and_then(|meta| meta.get_attribute("content"))
        .map(|json| LandingConfig::from_json(&json))
        .unwrap_or_default()
}

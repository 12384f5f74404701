#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::executor::block_on;
    use serde_json::json;

    use crate::core::analytics::testing::RecordingSink;
    use crate::core::backend::testing::RecordingTransport;
    use crate::core::storage::{COUNT_KEY, SUBMITTED_EMAILS_KEY};
    use crate::core::{
        Analytics, AnalyticsEvent, BackendKind, BackendPreference, CountDisplay, CounterStore,
        FeedbackSlot, KeyValueStore, LandingConfig, MemoryStore, ScrollDepthTracker,
        SubmissionPipeline, SubmitError, events, format_count, scroll_percent,
    };

    #[derive(Clone, Default)]
    struct TextDisplay(Arc<Mutex<String>>);

    impl CountDisplay for TextDisplay {
        fn show(&self, text: &str) {
            *self.0.lock().unwrap() = text.to_string();
        }
    }

    struct Page {
        pipeline: SubmissionPipeline,
        store: Arc<MemoryStore>,
        sink: RecordingSink,
        hero: TextDisplay,
        footer: TextDisplay,
    }

    fn load_page(config: LandingConfig, store: Arc<MemoryStore>) -> Page {
        let mut counter = CounterStore::load(config.initial_waitlist_count, store.clone());
        let hero = TextDisplay::default();
        let footer = TextDisplay::default();
        counter.bind(hero.clone());
        counter.bind(footer.clone());

        let sink = RecordingSink::default();
        let pipeline = SubmissionPipeline::from_config(
            &config,
            Arc::new(RecordingTransport::new()),
            store.clone(),
            Arc::new(Mutex::new(counter)),
            Analytics::new().with_sink(sink.clone()),
        );

        Page {
            pipeline,
            store,
            sink,
            hero,
            footer,
        }
    }

    fn shown(display: &TextDisplay) -> String {
        display.0.lock().unwrap().clone()
    }

    // ========================================================================
    // Local Fallback Scenarios
    // ========================================================================

    #[test]
    fn test_same_email_twice_on_local_backend() {
        let page = load_page(LandingConfig::default(), Arc::new(MemoryStore::new()));

        let first = block_on(page.pipeline.submit("a@b.co", BackendPreference::Auto));
        let second = block_on(page.pipeline.submit("a@b.co", BackendPreference::Auto));

        assert_eq!(first.unwrap().backend, BackendKind::Local);
        assert_eq!(second, Err(SubmitError::DuplicateEmail));
        assert_eq!(page.sink.names(), vec!["signup", "signup_error"]);
        assert_eq!(
            page.sink.events()[1].get("reason"),
            Some(&json!("duplicate_email"))
        );
    }

    #[test]
    fn test_signup_updates_every_display() {
        let config = LandingConfig {
            initial_waitlist_count: 999,
            ..LandingConfig::default()
        };
        let page = load_page(config, Arc::new(MemoryStore::new()));
        assert_eq!(shown(&page.hero), "999");

        block_on(page.pipeline.submit("new@person.io", BackendPreference::Auto)).unwrap();

        assert_eq!(shown(&page.hero), "1,000");
        assert_eq!(shown(&page.footer), "1,000");
        assert_eq!(
            page.store.get_item(COUNT_KEY).unwrap(),
            Some("1000".to_string())
        );
    }

    #[test]
    fn test_reload_keeps_count_and_duplicates() {
        let store = Arc::new(MemoryStore::new());
        let page = load_page(LandingConfig::default(), store.clone());
        block_on(page.pipeline.submit("a@b.co", BackendPreference::Auto)).unwrap();
        block_on(page.pipeline.submit("c@d.co", BackendPreference::Auto)).unwrap();
        drop(page);

        let reloaded = load_page(LandingConfig::default(), store);
        assert_eq!(shown(&reloaded.hero), format_count(249));
        assert_eq!(
            block_on(reloaded.pipeline.submit("c@d.co", BackendPreference::Auto)),
            Err(SubmitError::DuplicateEmail)
        );

        let records = reloaded.store.get_item(SUBMITTED_EMAILS_KEY).unwrap().unwrap();
        let records: serde_json::Value = serde_json::from_str(&records).unwrap();
        assert_eq!(records.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_email_keeps_count() {
        let page = load_page(LandingConfig::default(), Arc::new(MemoryStore::new()));

        let result = block_on(page.pipeline.submit("a@b", BackendPreference::Auto));

        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert_eq!(shown(&page.hero), "247");
        assert!(page.sink.events().is_empty());
    }

    // ========================================================================
    // Form Flow Scenarios
    // ========================================================================

    #[test]
    fn test_failed_submission_feedback_flow() {
        let page = load_page(LandingConfig::default(), Arc::new(MemoryStore::new()));
        let mut slot = FeedbackSlot::new();

        block_on(page.pipeline.submit("a@b.co", BackendPreference::Auto)).unwrap();
        slot.show_success(false);

        for _ in 0..2 {
            let err =
                block_on(page.pipeline.submit("a@b.co", BackendPreference::Auto)).unwrap_err();
            slot.show_error(err.to_string());
        }

        assert_eq!(slot.node_count(), 1);
        assert_eq!(
            slot.current().unwrap().message,
            "This email is already on the waitlist"
        );
    }

    #[test]
    fn test_scroll_session_emits_each_depth_once() {
        let sink = RecordingSink::default();
        let analytics = Analytics::new().with_sink(sink.clone());
        let mut tracker = ScrollDepthTracker::new();

        // 4000px page in a 1000px viewport: 3000px of scrollable range
        for scroll_y in [300.0, 900.0, 600.0, 1800.0, 900.0] {
            let Some(percent) = scroll_percent(scroll_y, 4000.0, 1000.0) else {
                continue;
            };
            for milestone in tracker.observe(percent) {
                analytics.emit(
                    AnalyticsEvent::new(events::SCROLL_DEPTH).param("depth", milestone.to_string()),
                );
            }
        }

        let depths: Vec<_> = sink
            .events()
            .iter()
            .map(|e| e.get("depth").cloned())
            .collect();
        assert_eq!(depths, vec![Some(json!("25%")), Some(json!("50%"))]);
    }
}

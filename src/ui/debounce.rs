//! Trailing-edge debounce for browser event handlers

use leptos::prelude::*;

use crate::core::{Generation, Ticket};

/// Runs the most recent callback once no new call arrived for `wait_ms`
#[derive(Clone, Copy)]
pub struct Debounce {
    wait_ms: u32,
    latest: StoredValue<Generation>,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            latest: StoredValue::new(Generation::new()),
        }
    }

    /// Whether the call issued `ticket` is still the latest one
    fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.try_with_value(|g| g.is_current(ticket)) == Some(true)
    }

    /// Schedule `f`, cancelling any call still waiting
    pub fn call(&self, f: impl FnOnce() + 'static) {
        self.latest.update_value(|g| {
            g.advance();
        });
        let ticket = self.latest.with_value(|g| g.current());

        #[cfg(not(feature = "ssr"))]
        {
            use gloo_timers::future::TimeoutFuture;
            use leptos::task::spawn_local;

            let debounce = *self;
            spawn_local(async move {
                TimeoutFuture::new(debounce.wait_ms).await;
                if debounce.is_latest(ticket) {
                    f();
                }
            });
        }

        // No timers while rendering on the server
        #[cfg(feature = "ssr")]
        {
            let _ = self.wait_ms;
            if self.is_latest(ticket) {
                f();
            }
        }
    }
}

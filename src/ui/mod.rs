#[cfg(not(feature = "ssr"))]
pub mod browser;
pub mod context;
pub mod count_display;
pub mod cta;
pub mod debounce;
pub mod feedback;
pub mod page_tracker;
pub mod pages;
pub mod waitlist_form;

pub use context::{WaitlistContext, provide_waitlist_context, use_waitlist_context};
pub use count_display::WaitlistCount;
pub use cta::{AnchorLink, CtaButton};
pub use page_tracker::PageTracker;
pub use waitlist_form::WaitlistForm;
